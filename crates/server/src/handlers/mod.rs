//! HTTP request handlers.

pub mod health;
pub mod profile;
pub mod task_lists;
pub mod tasks;

pub use health::health_check;
pub use profile::{delete_profile_image, get_profile_image, upload_profile_image};
pub use task_lists::{
    create_task_list, delete_task_list, get_task_list, list_task_lists, update_task_list,
};
pub use tasks::{
    create_task, delete_task, get_task, get_task_counts, list_tasks, update_task,
    update_task_status,
};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Format a timestamp for JSON responses.
pub(crate) fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}
