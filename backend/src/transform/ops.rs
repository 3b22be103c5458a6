//! Pure matrix operations.
//!
//! None of these keep state or mutate their input; they are safe to call
//! from any number of request tasks at once.

use crate::error::{MatrixError, MatrixResult};
use crate::models::{IntMatrix, Matrix};

/// Render rows as comma-joined lines, each ending with `\n`.
pub fn matrix_to_string(matrix: &Matrix) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// All cells in row-major order as one comma-separated line.
pub fn matrix_to_flat_string(matrix: &Matrix) -> String {
    matrix.cells().collect::<Vec<_>>().join(",")
}

/// Swap rows and columns: output `(j, i)` is input `(i, j)`.
pub fn transpose(matrix: &Matrix) -> Matrix {
    let rows = matrix.rows();
    let cols = matrix.column_count();

    let transposed = (0..cols)
        .map(|j| rows.iter().filter_map(|row| row.get(j).cloned()).collect())
        .collect();

    Matrix::new(transposed)
}

/// Parse every cell as a decimal `i64`.
///
/// Accepts an optional leading sign; rejects whitespace, fractions and
/// anything else. The first bad cell aborts the whole conversion.
pub fn to_int_matrix(matrix: &Matrix) -> MatrixResult<IntMatrix> {
    let rows = matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.parse::<i64>().map_err(|_| MatrixError::NonIntegerElement))
                .collect::<MatrixResult<Vec<i64>>>()
        })
        .collect::<MatrixResult<Vec<_>>>()?;

    Ok(IntMatrix::new(rows))
}

/// Sum of all cells. Wraps on overflow; an empty matrix sums to 0.
pub fn sum(matrix: &Matrix) -> MatrixResult<i64> {
    let ints = to_int_matrix(matrix)?;
    Ok(ints.values().fold(0i64, i64::wrapping_add))
}

/// Product of all cells, seeded with 1. Wraps on overflow.
pub fn product(matrix: &Matrix) -> MatrixResult<i64> {
    let ints = to_int_matrix(matrix)?;
    Ok(ints.values().fold(1i64, i64::wrapping_mul))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Matrix {
        Matrix::from_rows([["1", "2", "3"], ["4", "5", "6"], ["7", "8", "9"]])
    }

    fn with_strings() -> Matrix {
        Matrix::from_rows([["a", "b", "c"], ["4", "5", "6"], ["7", "8", "9"]])
    }

    #[test]
    fn test_matrix_to_string() {
        assert_eq!(matrix_to_string(&valid()), "1,2,3\n4,5,6\n7,8,9\n");
    }

    #[test]
    fn test_matrix_to_string_empty() {
        assert_eq!(matrix_to_string(&Matrix::default()), "");
    }

    #[test]
    fn test_matrix_to_string_line_per_row() {
        let rendered = matrix_to_string(&valid());
        assert!(rendered.ends_with('\n'));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["1,2,3", "4,5,6", "7,8,9"]);
    }

    #[test]
    fn test_matrix_to_flat_string() {
        let flat = matrix_to_flat_string(&valid());
        assert_eq!(flat, "1,2,3,4,5,6,7,8,9");
        assert_eq!(flat.matches(',').count(), 3 * 3 - 1);
        assert!(!flat.contains('\n'));
    }

    #[test]
    fn test_transpose() {
        let expected = Matrix::from_rows([["1", "4", "7"], ["2", "5", "8"], ["3", "6", "9"]]);
        assert_eq!(transpose(&valid()), expected);
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let m = valid();
        assert_eq!(transpose(&transpose(&m)), m);
    }

    #[test]
    fn test_transpose_rectangular_swaps_dimensions() {
        let m = Matrix::from_rows([["1", "2", "3"], ["4", "5", "6"]]);
        let t = transpose(&m);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t, Matrix::from_rows([["1", "4"], ["2", "5"], ["3", "6"]]));
    }

    #[test]
    fn test_transpose_empty() {
        assert!(transpose(&Matrix::default()).is_empty());
    }

    #[test]
    fn test_to_int_matrix() {
        let ints = to_int_matrix(&valid()).unwrap();
        assert_eq!(
            ints,
            IntMatrix::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
        );
    }

    #[test]
    fn test_to_int_matrix_signs() {
        let m = Matrix::from_rows([["-1", "+2"], ["0", "-0"]]);
        let ints = to_int_matrix(&m).unwrap();
        assert_eq!(ints, IntMatrix::new(vec![vec![-1, 2], vec![0, 0]]));
    }

    #[test]
    fn test_to_int_matrix_is_strict() {
        for cell in ["a", " 1", "1 ", "1.5", "", "1e3", "0x10"] {
            let m = Matrix::from_rows([[cell]]);
            assert_eq!(
                to_int_matrix(&m),
                Err(MatrixError::NonIntegerElement),
                "cell {:?} should be rejected",
                cell
            );
        }
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&valid()), Ok(45));
    }

    #[test]
    fn test_product() {
        assert_eq!(product(&valid()), Ok(362880));
    }

    #[test]
    fn test_non_integer_fails_both_aggregates() {
        assert_eq!(sum(&with_strings()), Err(MatrixError::NonIntegerElement));
        assert_eq!(product(&with_strings()), Err(MatrixError::NonIntegerElement));

        let last_bad = Matrix::from_rows([["1", "2"], ["3", "x"]]);
        assert_eq!(sum(&last_bad), Err(MatrixError::NonIntegerElement));
        assert_eq!(product(&last_bad), Err(MatrixError::NonIntegerElement));
    }

    #[test]
    fn test_aggregates_of_empty_matrix() {
        assert_eq!(sum(&Matrix::default()), Ok(0));
        assert_eq!(product(&Matrix::default()), Ok(1));
    }

    #[test]
    fn test_aggregates_invariant_under_transpose() {
        let m = Matrix::from_rows([["3", "-7"], ["11", "2"]]);
        assert_eq!(sum(&m), sum(&transpose(&m)));
        assert_eq!(product(&m), product(&transpose(&m)));
    }

    #[test]
    fn test_product_with_zero() {
        let m = Matrix::from_rows([["5", "0"], ["9", "8"]]);
        assert_eq!(product(&m), Ok(0));
    }

    #[test]
    fn test_overflow_wraps() {
        let m = Matrix::from_rows([[i64::MAX.to_string(), "1".to_string()]]);
        assert_eq!(sum(&m), Ok(i64::MIN));
    }
}
