//! Conversions to dense arrays and to `sprs` CSR matrices
//!
//! These are used to check results against independent implementations,
//! not as an alternative storage format.

use ndarray::Array2;
use sprs::CsMat;

use crate::error::{Result, SparseError};
use crate::matrix::SparseMatrix;

impl SparseMatrix {
    /// Fails with [`SparseError::IndexOutOfBounds`] on the first entry outside the shape
    ///
    /// Only matrices built through the unchecked constructor can fail this.
    pub fn check_bounds(&self) -> Result<()> {
        match self
            .entries()
            .find(|e| e.row >= self.n_rows || e.col >= self.n_cols)
        {
            Some(e) => Err(SparseError::IndexOutOfBounds {
                row: e.row,
                col: e.col,
                n_rows: self.n_rows,
                n_cols: self.n_cols,
            }),
            None => Ok(()),
        }
    }

    /// Expands into a dense `n_rows x n_cols` array
    pub fn to_dense(&self) -> Result<Array2<i64>> {
        self.check_bounds()?;
        let mut dense = Array2::zeros((self.n_rows, self.n_cols));
        for e in self.entries() {
            dense[[e.row, e.col]] = e.value;
        }
        Ok(dense)
    }

    /// Collects the non-zero cells of a dense array
    pub fn from_dense(dense: &Array2<i64>) -> Self {
        let (n_rows, n_cols) = dense.dim();
        let mut matrix = Self::new(n_rows, n_cols);
        for ((row, col), &value) in dense.indexed_iter() {
            matrix.set(row, col, value);
        }
        matrix
    }

    /// Converts to sprs CsMat in CSR format
    pub fn to_sprs(&self) -> Result<CsMat<i64>> {
        self.check_bounds()?;

        let nnz = self.nnz();
        let mut row_ptr = Vec::with_capacity(self.n_rows + 1);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        row_ptr.push(0);
        for i in 0..self.n_rows {
            for (col, value) in self.row_iter(i) {
                col_idx.push(col);
                values.push(value);
            }
            row_ptr.push(col_idx.len());
        }

        Ok(CsMat::new((self.n_rows, self.n_cols), row_ptr, col_idx, values))
    }

    /// Converts from sprs CsMat, in either CSR or CSC storage
    ///
    /// Explicitly stored zeros are dropped.
    pub fn from_sprs(matrix: &CsMat<i64>) -> Self {
        // Ensure matrix is in CSR format
        let csr = if matrix.is_csr() {
            matrix.clone()
        } else {
            matrix.to_csr()
        };

        let (n_rows, n_cols) = csr.shape();
        let mut result = Self::new(n_rows, n_cols);
        for (row, vec) in csr.outer_iterator().enumerate() {
            for (col, &value) in vec.iter() {
                result.set(row, col, value);
            }
        }
        result
    }
}
