//! Elementwise addition and subtraction

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, SparseError};
use crate::matrix::{ExecConfig, SparseMatrix};
use crate::ops::accumulator::WideAccumulator;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn op_name(self) -> &'static str {
        match self {
            Sign::Plus => "add",
            Sign::Minus => "subtract",
        }
    }
}

/// Computes `a + b`
///
/// # Errors
///
/// [`SparseError::DimensionMismatch`] unless both operands have the same
/// shape, [`SparseError::Overflow`] if a sum leaves the i64 range.
///
/// # Examples
///
/// ```
/// use sparsecalc::{add, SparseMatrix};
///
/// let a = SparseMatrix::from_entries(1, 1, [(0, 0, 5)]).unwrap();
/// let b = SparseMatrix::from_entries(1, 1, [(0, 0, -5)]).unwrap();
///
/// let c = add(&a, &b).unwrap();
/// assert_eq!(c.nnz(), 0);
/// ```
pub fn add(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    add_with(a, b, &ExecConfig::default())
}

/// Computes `a - b`
pub fn subtract(a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    subtract_with(a, b, &ExecConfig::default())
}

/// [`add`] with explicit execution settings
pub fn add_with(a: &SparseMatrix, b: &SparseMatrix, config: &ExecConfig) -> Result<SparseMatrix> {
    combine(a, b, Sign::Plus, config)
}

/// [`subtract`] with explicit execution settings
pub fn subtract_with(
    a: &SparseMatrix,
    b: &SparseMatrix,
    config: &ExecConfig,
) -> Result<SparseMatrix> {
    combine(a, b, Sign::Minus, config)
}

fn combine(
    a: &SparseMatrix,
    b: &SparseMatrix,
    sign: Sign,
    config: &ExecConfig,
) -> Result<SparseMatrix> {
    if a.shape() != b.shape() {
        return Err(SparseError::DimensionMismatch {
            op: sign.op_name(),
            left: a.shape(),
            right: b.shape(),
        });
    }

    // Every row that holds an entry in either operand
    let active_rows: BTreeSet<usize> = a.rows.keys().chain(b.rows.keys()).copied().collect();

    let parallel = config.use_parallel(active_rows.len());
    debug!(
        op = sign.op_name(),
        rows = a.n_rows,
        cols = a.n_cols,
        lhs_nnz = a.nnz(),
        rhs_nnz = b.nnz(),
        active_rows = active_rows.len(),
        parallel,
        "elementwise operation"
    );

    // Copy the row of `a`, then fold every entry of `b` into it
    let combine_row = |row: usize| -> Result<_> {
        let mut acc = WideAccumulator::from_row(row, a.rows.get(&row));
        if let Some(cols) = b.rows.get(&row) {
            for (&col, &value) in cols {
                match sign {
                    Sign::Plus => acc.add(col, value)?,
                    Sign::Minus => acc.sub(col, value)?,
                }
            }
        }
        acc.finish()
    };

    let rows: Vec<_> = if parallel {
        active_rows
            .into_par_iter()
            .map(combine_row)
            .collect::<Result<_>>()?
    } else {
        active_rows
            .into_iter()
            .map(combine_row)
            .collect::<Result<_>>()?
    };

    Ok(SparseMatrix::from_rows(a.n_rows, a.n_cols, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(n_rows: usize, n_cols: usize, entries: &[(usize, usize, i64)]) -> SparseMatrix {
        SparseMatrix::from_entries(n_rows, n_cols, entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_add_simple() {
        let a = matrix(2, 2, &[(0, 0, 1), (1, 1, 2)]);
        let b = matrix(2, 2, &[(0, 0, 3), (0, 1, 4)]);

        let c = add(&a, &b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.get(0, 0), 4);
        assert_eq!(c.get(0, 1), 4);
        assert_eq!(c.get(1, 1), 2);
        assert_eq!(c.nnz(), 3);
    }

    #[test]
    fn test_add_cancellation_in_populated_row() {
        // Row 0 already has another entry when (0, 1) cancels
        let a = matrix(1, 3, &[(0, 0, 7), (0, 1, 5)]);
        let b = matrix(1, 3, &[(0, 1, -5)]);

        let c = add(&a, &b).unwrap();
        assert_eq!(c.nnz(), 1);
        assert!(c.entries().all(|e| e.value != 0));
    }

    #[test]
    fn test_subtract_self_is_empty() {
        let a = matrix(3, 3, &[(0, 0, 1), (1, 2, -4), (2, 1, 9)]);
        let c = subtract(&a, &a).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.shape(), (3, 3));
    }

    #[test]
    fn test_subtract_missing_left() {
        let a = matrix(2, 2, &[]);
        let b = matrix(2, 2, &[(1, 0, 6)]);
        let c = subtract(&a, &b).unwrap();
        assert_eq!(c.get(1, 0), -6);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = matrix(2, 3, &[]);
        let b = matrix(3, 2, &[]);

        let err = add(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            SparseError::DimensionMismatch { op: "add", left: (2, 3), right: (3, 2) }
        ));

        let err = subtract(&a, &b).unwrap_err();
        assert!(matches!(err, SparseError::DimensionMismatch { op: "subtract", .. }));
    }

    #[test]
    fn test_overflow() {
        let a = matrix(1, 1, &[(0, 0, i64::MAX)]);
        let b = matrix(1, 1, &[(0, 0, 1)]);
        assert!(matches!(
            add(&a, &b).unwrap_err(),
            SparseError::Overflow { row: 0, col: 0 }
        ));

        let a = matrix(1, 1, &[(0, 0, i64::MIN)]);
        assert!(matches!(
            subtract(&a, &b).unwrap_err(),
            SparseError::Overflow { .. }
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let entries_a: Vec<_> = (0..200).map(|i| (i, (i * 7) % 50, i as i64 - 100)).collect();
        let entries_b: Vec<_> = (0..200).map(|i| (i, (i * 3) % 50, 100 - i as i64)).collect();
        let a = matrix(200, 50, &entries_a);
        let b = matrix(200, 50, &entries_b);

        let parallel = ExecConfig::default().with_threads(4).with_parallel_threshold(1);
        let sequential = ExecConfig::sequential();

        assert_eq!(
            add_with(&a, &b, &parallel).unwrap(),
            add_with(&a, &b, &sequential).unwrap()
        );
        assert_eq!(
            subtract_with(&a, &b, &parallel).unwrap(),
            subtract_with(&a, &b, &sequential).unwrap()
        );
    }
}
