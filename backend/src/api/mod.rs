//! HTTP API module.
//!
//! This module provides the HTTP server, response types and request logs.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server, MULTIPART_FILE_FIELD};
pub use types::*;
