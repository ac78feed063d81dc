//! HTTP API server for the task tracking service.
//!
//! This crate provides the HTTP layer:
//! - Task list CRUD endpoints
//! - Task CRUD, status update, and count endpoints
//! - Profile image upload and management
//! - Health check

pub mod bootstrap;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
