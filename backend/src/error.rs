//! Error types for the matrix service.
//!
//! - [`MatrixError`] - user-input errors raised while validating an upload
//!   or converting its cells. Every variant becomes a `400 Bad Request`.
//! - [`ServerError`] - process-level failures (listener, local files).

use thiserror::Error;

// =============================================================================
// Request Errors
// =============================================================================

/// Errors raised by request intake and the matrix operations.
///
/// The `Display` text of each variant is the exact body sent back to the
/// caller (followed by a newline).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The multipart field was missing or could not be read.
    #[error("{0}")]
    FileExtraction(String),

    /// The uploaded filename does not end in `.csv`.
    #[error("invalid file format, only CSV allowed")]
    InvalidFileFormat,

    /// The CSV reader rejected the content (ragged rows, bad encoding).
    #[error("{0}")]
    MalformedCsv(String),

    /// The upload parsed to zero rows.
    #[error("matrix shouldn't be empty")]
    EmptyMatrix,

    /// Some row's length differs from the number of rows.
    #[error("matrix should be square")]
    NotSquare,

    /// A cell is not a decimal integer.
    #[error("only integers allowed in matrix")]
    NonIntegerElement,
}

// =============================================================================
// Server Errors
// =============================================================================

/// Errors from the process around the request pipeline.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listening socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop stopped with an IO error.
    #[error("Server error: {0}")]
    Serve(std::io::Error),

    /// Could not read a local input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid host/port configuration.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for intake and matrix operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for server and CLI operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            MatrixError::InvalidFileFormat.to_string(),
            "invalid file format, only CSV allowed"
        );
        assert_eq!(MatrixError::EmptyMatrix.to_string(), "matrix shouldn't be empty");
        assert_eq!(MatrixError::NotSquare.to_string(), "matrix should be square");
        assert_eq!(
            MatrixError::NonIntegerElement.to_string(),
            "only integers allowed in matrix"
        );
    }

    #[test]
    fn test_wrapped_messages_are_verbatim() {
        let err = MatrixError::MalformedCsv("record on line 2: wrong number of fields".into());
        assert_eq!(err.to_string(), "record on line 2: wrong number of fields");

        let err = MatrixError::FileExtraction("no such file".into());
        assert_eq!(err.to_string(), "no such file");
    }

    #[test]
    fn test_bind_error_format() {
        let err = ServerError::Bind {
            addr: "0.0.0.0:8080".into(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.0.0.0:8080"));
        assert!(msg.contains("in use"));
    }
}
