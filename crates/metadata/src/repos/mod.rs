//! Repository traits for metadata operations.

pub mod task_lists;
pub mod tasks;
pub mod users;

pub use task_lists::TaskListRepo;
pub use tasks::{TaskFilter, TaskRepo};
pub use users::UserRepo;
