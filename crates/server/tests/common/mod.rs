//! Shared test utilities.

pub mod server;

pub use server::TestServer;
