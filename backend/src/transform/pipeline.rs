//! Validate-then-dispatch pipeline shared by every endpoint and the CLI.
//!
//! ```text
//! Upload ──▶ validate_upload ──▶ Matrix ──▶ Operation::apply ──▶ body
//!               (400 on error)                (400 on error)
//! ```
//!
//! # Example
//!
//! ```rust
//! use matrixcsv::{run, Operation, Upload};
//!
//! let upload = Upload::new("matrix.csv", "1,2\n3,4\n");
//! assert_eq!(run(Operation::Sum, &upload).unwrap(), "10");
//! ```

use crate::error::MatrixResult;
use crate::models::Upload;
use crate::parser::validate_upload;

use super::operation::Operation;

/// Validate an upload and apply one operation to the resulting matrix.
///
/// Nothing is produced unless both steps succeed.
pub fn run(operation: Operation, upload: &Upload) -> MatrixResult<String> {
    let matrix = validate_upload(upload)?;
    operation.apply(&matrix)
}
