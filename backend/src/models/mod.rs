//! Domain models for the matrix service.
//!
//! - [`Matrix`] - validated grid of string cells, as parsed from CSV
//! - [`IntMatrix`] - the same grid with every cell parsed as `i64`
//! - [`Upload`] - an uploaded file (name + bytes)

use serde::Serialize;

// =============================================================================
// String Matrix
// =============================================================================

/// Grid of string cells in row-major order.
///
/// Rows are owned and never mutated after construction. Operations that
/// derive a new shape (transpose) return a new `Matrix`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Matrix {
    rows: Vec<Vec<String>>,
}

impl Matrix {
    /// Wrap already-parsed rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a matrix from string slices (handy for tests and literals).
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in the first row (0 for an empty matrix).
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when every row holds exactly as many cells as there are rows.
    ///
    /// Checked per row, so a ragged grid is rejected here as well.
    pub fn is_square(&self) -> bool {
        let n = self.rows.len();
        self.rows.iter().all(|row| row.len() == n)
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

// =============================================================================
// Integer Matrix
// =============================================================================

/// Integer form of a [`Matrix`]. Only exists if every cell parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IntMatrix {
    rows: Vec<Vec<i64>>,
}

impl IntMatrix {
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    /// Iterate over all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().flatten().copied()
    }
}

// =============================================================================
// Upload
// =============================================================================

/// A file received from a multipart request or read from disk.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied filename; only its extension is inspected.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the uploaded content in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}
