//! # matrixcsv - square matrix operations over CSV uploads
//!
//! A small HTTP service: upload a square matrix as a CSV file and get it
//! back echoed, transposed, flattened, summed or multiplied.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  multipart  │────▶│   Intake    │────▶│  Operation  │────▶│ plain text  │
//! │ file=*.csv  │     │ (validate)  │     │ (pure fn)   │     │  200 / 400  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use matrixcsv::{run, Operation, Upload};
//!
//! let upload = Upload::new("matrix.csv", "1,2,3\n4,5,6\n7,8,9\n");
//! assert_eq!(run(Operation::Invert, &upload).unwrap(), "1,4,7\n2,5,8\n3,6,9\n");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Request and server error types
//! - [`models`] - Matrix, integer matrix and upload types
//! - [`parser`] - Upload validation and CSV parsing
//! - [`transform`] - Matrix operations and the validate-then-apply pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Intake
pub mod parser;

// Operations
pub mod transform;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{MatrixError, MatrixResult, ServerError, ServerResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{IntMatrix, Matrix, Upload};

// =============================================================================
// Re-exports - Intake
// =============================================================================

pub use parser::{check_extension, parse_csv, read_upload, validate_upload, CSV_EXTENSION};

// =============================================================================
// Re-exports - Operations
// =============================================================================

pub use transform::{
    matrix_to_flat_string,
    matrix_to_string,
    operations_description,
    product,
    run,
    sum,
    to_int_matrix,
    transpose,
    Operation,
};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
