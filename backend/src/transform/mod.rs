//! Matrix transformation module.
//!
//! - ops: pure string and integer matrix functions
//! - operation: one enum variant per endpoint
//! - pipeline: validate an upload, then apply one operation

pub mod operation;
pub mod ops;
pub mod pipeline;

pub use operation::{operations_description, Operation};
pub use ops::*;
pub use pipeline::run;
