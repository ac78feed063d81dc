//! Task status enumeration.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of a task.
///
/// There is no enforced transition graph: any status is reachable from any
/// other via an explicit status update or a full update.
///
/// On the wire the status serializes as the literal strings `"Pending"`,
/// `"InProgress"`, `"Completed"`. Input additionally accepts the numeric
/// codes 0/1/2, which is what the original client sends on status updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// All statuses, in numeric-code order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Stable string form, also used as the stored column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Parse the stable string form.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "Pending" => Some(TaskStatus::Pending),
            "InProgress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// Numeric wire code.
    pub fn code(&self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
        }
    }

    /// Parse the numeric wire code.
    pub fn from_code(code: u64) -> Option<TaskStatus> {
        match code {
            0 => Some(TaskStatus::Pending),
            1 => Some(TaskStatus::InProgress),
            2 => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct TaskStatusVisitor;

impl<'de> Visitor<'de> for TaskStatusVisitor {
    type Value = TaskStatus;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a task status name (\"Pending\", \"InProgress\", \"Completed\") or code (0, 1, 2)")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TaskStatus, E> {
        TaskStatus::parse(value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<TaskStatus, E> {
        TaskStatus::from_code(value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<TaskStatus, E> {
        u64::try_from(value)
            .ok()
            .and_then(TaskStatus::from_code)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(value), &self))
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<TaskStatus, D::Error> {
        deserializer.deserialize_any(TaskStatusVisitor)
    }
}
