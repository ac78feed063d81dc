//! Validation limits shared between the API layer and the store schema.

/// Maximum length of a user display name.
pub const MAX_USER_NAME_LEN: usize = 100;

/// Maximum length of a task list name.
pub const MAX_LIST_NAME_LEN: usize = 200;

/// Maximum length of a task title.
pub const MAX_TASK_TITLE_LEN: usize = 200;

/// Maximum length of a task description.
pub const MAX_TASK_DESCRIPTION_LEN: usize = 1000;

/// Maximum length of the stored profile image path.
pub const MAX_IMAGE_PATH_LEN: usize = 500;

/// Maximum accepted profile image size (5 MiB).
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted profile image extensions, compared case-insensitively.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];
