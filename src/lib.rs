//! # sparsecalc: sparse integer matrix arithmetic
//!
//! Matrices are stored as a two-level map from row to column to value, with
//! only non-zero values kept. Three binary operations combine two matrices
//! into a new one:
//!
//! - **Addition** and **subtraction** for operands of identical shape
//! - **Multiplication** when the left column count equals the right row count
//!
//! Arithmetic is checked. A result that leaves the `i64` range is an error,
//! never a wrapped value, and sums that cancel to zero are not stored.
//!
//! ## Usage
//!
//! ```
//! use sparsecalc::{Operation, SparseMatrix};
//!
//! let a = SparseMatrix::from_entries(2, 2, [(0, 0, 1), (1, 1, 2)])?;
//! let b = SparseMatrix::from_entries(2, 2, [(0, 0, 3), (0, 1, 4), (1, 0, 5), (1, 1, 6)])?;
//!
//! let c = Operation::Multiply.apply(&a, &b)?;
//! assert_eq!(c.to_string(), "Rows: 2, Cols: 2\n(0, 0, 3)\n(0, 1, 4)\n(1, 0, 10)\n(1, 1, 12)\n");
//! # Ok::<(), sparsecalc::SparseError>(())
//! ```
//!
//! Matrix files are read and written through [`io`]:
//!
//! ```no_run
//! use sparsecalc::io::{load_matrix, write_result, WriteMode};
//! use sparsecalc::subtract;
//!
//! let a = load_matrix("a.txt")?;
//! let b = load_matrix("b.txt")?;
//! write_result("a_b_results.txt", &subtract(&a, &b)?, WriteMode::Dimensions)?;
//! # Ok::<(), sparsecalc::SparseError>(())
//! ```

pub mod error;
pub mod io;
pub mod matrix;
pub mod ops;

// Re-export primary components
pub use error::{Result, SparseError};
pub use matrix::{Entry, ExecConfig, MatrixData, SparseMatrix};
pub use ops::{add, add_with, apply, multiply, multiply_with, subtract, subtract_with, Operation};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
