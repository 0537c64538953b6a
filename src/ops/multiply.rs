//! Sparse matrix product
//!
//! Row-by-row: for every stored `A[i,k]`, walk row `k` of `B` and accumulate
//! `A[i,k] * B[k,j]` into column `j` of output row `i`. Rows of `A` without
//! entries and rows of `B` without entries contribute nothing.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, SparseError};
use crate::matrix::{ExecConfig, SparseMatrix};
use crate::ops::accumulator::WideAccumulator;

/// Computes `a × b`
///
/// # Errors
///
/// [`SparseError::DimensionMismatch`] unless `a.n_cols() == b.n_rows()`,
/// [`SparseError::Overflow`] if a product or partial sum leaves the i64 range.
///
/// # Examples
///
/// ```
/// use sparsecalc::{multiply, SparseMatrix};
///
/// // A = [1 0; 0 2], B = [3 4; 5 6]
/// let a = SparseMatrix::from_entries(2, 2, [(0, 0, 1), (1, 1, 2)]).unwrap();
/// let b = SparseMatrix::from_entries(2, 2, [(0, 0, 3), (0, 1, 4), (1, 0, 5), (1, 1, 6)]).unwrap();
///
/// let c = multiply(&a, &b).unwrap();
/// assert_eq!(c.get(1, 0), 10);
/// assert_eq!(c.get(1, 1), 12);
/// ```
pub fn multiply(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    multiply_with(a, b, &ExecConfig::default())
}

/// [`multiply`] with explicit execution settings
pub fn multiply_with(
    a: &SparseMatrix,
    b: &SparseMatrix,
    config: &ExecConfig,
) -> Result<SparseMatrix> {
    if a.n_cols != b.n_rows {
        return Err(SparseError::DimensionMismatch {
            op: "multiply",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let parallel = config.use_parallel(a.non_empty_rows());
    debug!(
        lhs_rows = a.n_rows,
        inner = a.n_cols,
        rhs_cols = b.n_cols,
        lhs_nnz = a.nnz(),
        rhs_nnz = b.nnz(),
        parallel,
        "sparse multiply"
    );

    let multiply_row = |(i, a_cols): (usize, &BTreeMap<usize, i64>)| -> Result<_> {
        let mut acc = WideAccumulator::new(i);

        for (&k, &a_val) in a_cols {
            let Some(b_cols) = b.rows.get(&k) else {
                continue;
            };
            for (&j, &b_val) in b_cols {
                acc.add_product(j, a_val, b_val)?;
            }
        }

        acc.finish()
    };

    let rows: Vec<_> = if parallel {
        let a_rows: Vec<_> = a.rows().collect();
        a_rows
            .into_par_iter()
            .map(multiply_row)
            .collect::<Result<_>>()?
    } else {
        a.rows().map(multiply_row).collect::<Result<_>>()?
    };

    Ok(SparseMatrix::from_rows(a.n_rows, b.n_cols, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(n_rows: usize, n_cols: usize, entries: &[(usize, usize, i64)]) -> SparseMatrix {
        SparseMatrix::from_entries(n_rows, n_cols, entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_reference_multiplication() {
        // A = [1 2; 0 3]
        // B = [4 5; 6 7]
        // Expected result: C = A*B = [16 19; 18 21]
        let a = matrix(2, 2, &[(0, 0, 1), (0, 1, 2), (1, 1, 3)]);
        let b = matrix(2, 2, &[(0, 0, 4), (0, 1, 5), (1, 0, 6), (1, 1, 7)]);

        let result = multiply(&a, &b).unwrap();

        assert_eq!(result.shape(), (2, 2));
        assert_eq!(result.nnz(), 4);
        assert_eq!(result.get(0, 0), 16);
        assert_eq!(result.get(0, 1), 19);
        assert_eq!(result.get(1, 0), 18);
        assert_eq!(result.get(1, 1), 21);
    }

    #[test]
    fn test_identity_multiplication() {
        let identity = matrix(3, 3, &[(0, 0, 1), (1, 1, 1), (2, 2, 1)]);
        let diagonal = matrix(3, 3, &[(0, 0, 5), (1, 1, 6), (2, 2, 7)]);

        let result = multiply(&identity, &diagonal).unwrap();
        assert_eq!(result, diagonal);
    }

    #[test]
    fn test_rectangular_shape() {
        // (2x3) * (3x4) -> 2x4
        let a = matrix(2, 3, &[(0, 2, 2), (1, 0, -1)]);
        let b = matrix(3, 4, &[(2, 3, 5), (0, 1, 4)]);

        let result = multiply(&a, &b).unwrap();
        assert_eq!(result.shape(), (2, 4));
        assert_eq!(result.get(0, 3), 10);
        assert_eq!(result.get(1, 1), -4);
        assert_eq!(result.nnz(), 2);
    }

    #[test]
    fn test_products_cancel() {
        // [1 1] * [3; -3] = [0]
        let a = matrix(1, 2, &[(0, 0, 1), (0, 1, 1)]);
        let b = matrix(2, 1, &[(0, 0, 3), (1, 0, -3)]);

        let result = multiply(&a, &b).unwrap();
        assert_eq!(result.shape(), (1, 1));
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_inner_rows_skipped() {
        let a = matrix(2, 3, &[(0, 1, 4), (1, 2, 2)]);
        let b = matrix(3, 2, &[(2, 0, 3)]);

        let result = multiply(&a, &b).unwrap();
        assert_eq!(result.nnz(), 1);
        assert_eq!(result.get(1, 0), 6);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = matrix(2, 3, &[(0, 0, 1)]);
        let b = matrix(2, 2, &[(0, 0, 1)]);

        let err = multiply(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            SparseError::DimensionMismatch { op: "multiply", left: (2, 3), right: (2, 2) }
        ));
    }

    #[test]
    fn test_product_overflow() {
        let a = matrix(1, 1, &[(0, 0, i64::MAX)]);
        let b = matrix(1, 1, &[(0, 0, 2)]);
        assert!(matches!(
            multiply(&a, &b).unwrap_err(),
            SparseError::Overflow { row: 0, col: 0 }
        ));
    }

    #[test]
    fn test_running_sum_outside_range_recovers() {
        // [MAX 1 -1] * [1; 1; 1] = [MAX], whatever order the columns are visited in
        let a = matrix(1, 3, &[(0, 0, i64::MAX), (0, 1, 1), (0, 2, -1)]);
        let b = matrix(3, 1, &[(0, 0, 1), (1, 0, 1), (2, 0, 1)]);

        let result = multiply(&a, &b).unwrap();
        assert_eq!(result.get(0, 0), i64::MAX);

        let a = matrix(1, 2, &[(0, 0, i64::MIN), (0, 1, i64::MIN)]);
        let b = matrix(2, 1, &[(0, 0, 1), (1, 0, -1)]);
        assert!(multiply(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let entries_a: Vec<_> = (0..300).map(|i| (i, (i * 11) % 40, (i % 9) as i64 - 4)).collect();
        let entries_b: Vec<_> = (0..40).map(|k| (k, (k * 5) % 25, (k % 7) as i64 - 3)).collect();
        let a = matrix(300, 40, &entries_a);
        let b = matrix(40, 25, &entries_b);

        let parallel = ExecConfig::default().with_threads(4).with_parallel_threshold(1);
        assert_eq!(
            multiply_with(&a, &b, &parallel).unwrap(),
            multiply_with(&a, &b, &ExecConfig::sequential()).unwrap()
        );
    }
}
