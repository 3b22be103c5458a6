//! Endpoint operations.
//!
//! Each variant maps one HTTP path to one pure function from [`super::ops`].
//! The router and the CLI are both built from [`Operation::ALL`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ops::{matrix_to_flat_string, matrix_to_string, product, sum, transpose};
use crate::error::MatrixResult;
use crate::models::Matrix;

/// Operation applied to a validated matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Return the matrix unchanged
    Echo,

    /// Return the transposed matrix
    Invert,

    /// Return all cells on one comma-separated line
    Flatten,

    /// Return the sum of all cells
    Sum,

    /// Return the product of all cells
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Invert,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Invert => "invert",
            Operation::Flatten => "flatten",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
        }
    }

    /// Route path served for this operation.
    pub fn path(self) -> &'static str {
        match self {
            Operation::Echo => "/echo",
            Operation::Invert => "/invert",
            Operation::Flatten => "/flatten",
            Operation::Sum => "/sum",
            Operation::Multiply => "/multiply",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Echo => "Matrix as uploaded, one row per line",
            Operation::Invert => "Transposed matrix, one row per line",
            Operation::Flatten => "All cells on a single comma-separated line",
            Operation::Sum => "Sum of all cells (integers only)",
            Operation::Multiply => "Product of all cells (integers only)",
        }
    }

    /// Render the response body for a validated matrix.
    ///
    /// Only `Sum` and `Multiply` can fail, and only with
    /// [`crate::error::MatrixError::NonIntegerElement`].
    pub fn apply(self, matrix: &Matrix) -> MatrixResult<String> {
        Ok(match self {
            Operation::Echo => matrix_to_string(matrix),
            Operation::Invert => matrix_to_string(&transpose(matrix)),
            Operation::Flatten => matrix_to_flat_string(matrix),
            Operation::Sum => sum(matrix)?.to_string(),
            Operation::Multiply => product(matrix)?.to_string(),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim_start_matches('/');
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}

/// Human-readable table of operations, as printed by the CLI.
pub fn operations_description() -> String {
    let mut out = String::from(
        "Available operations:\n\n| Operation | Endpoint | Description |\n|-----------|----------|-------------|\n",
    );
    for op in Operation::ALL {
        out.push_str(&format!(
            "| {} | POST {} | {} |\n",
            op.name(),
            op.path(),
            op.description()
        ));
    }
    out.push_str("\nUpload the matrix as multipart field `file` (a .csv file):\n");
    out.push_str("  curl -F 'file=@./matrix.csv' \"localhost:8080/echo\"");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;

    fn valid() -> Matrix {
        Matrix::from_rows([["1", "2", "3"], ["4", "5", "6"], ["7", "8", "9"]])
    }

    #[test]
    fn test_apply_each_operation() {
        let m = valid();
        assert_eq!(Operation::Echo.apply(&m).unwrap(), "1,2,3\n4,5,6\n7,8,9\n");
        assert_eq!(Operation::Invert.apply(&m).unwrap(), "1,4,7\n2,5,8\n3,6,9\n");
        assert_eq!(Operation::Flatten.apply(&m).unwrap(), "1,2,3,4,5,6,7,8,9");
        assert_eq!(Operation::Sum.apply(&m).unwrap(), "45");
        assert_eq!(Operation::Multiply.apply(&m).unwrap(), "362880");
    }

    #[test]
    fn test_string_operations_accept_any_cells() {
        let m = Matrix::from_rows([["a", "b"], ["c", "d"]]);
        assert_eq!(Operation::Invert.apply(&m).unwrap(), "a,c\nb,d\n");
        assert_eq!(Operation::Sum.apply(&m), Err(MatrixError::NonIntegerElement));
        assert_eq!(Operation::Multiply.apply(&m), Err(MatrixError::NonIntegerElement));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sum".parse::<Operation>(), Ok(Operation::Sum));
        assert_eq!("/invert".parse::<Operation>(), Ok(Operation::Invert));
        assert!("divide".parse::<Operation>().is_err());
    }

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<&str> = Operation::ALL.iter().map(|op| op.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Operation::ALL.len());
    }

    #[test]
    fn test_description_lists_every_endpoint() {
        let text = operations_description();
        for op in Operation::ALL {
            assert!(text.contains(op.path()));
        }
    }
}
