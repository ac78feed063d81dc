//! Shared types for the task list server.
//!
//! This crate provides:
//! - Application configuration sections
//! - The task status enumeration and its wire encoding
//! - Validation limits shared between the API layer and the store

pub mod config;
pub mod limits;
pub mod status;

pub use config::{AppConfig, MetadataConfig, ServerConfig, StorageConfig, UserConfig};
pub use status::TaskStatus;
