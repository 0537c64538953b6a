//! Error types for sparse matrix operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, combining, reading or writing matrices
#[derive(Error, Debug)]
pub enum SparseError {
    /// Operand shapes are incompatible for the requested operation
    #[error("dimension mismatch for {op}: left is {}x{}, right is {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A coordinate lies outside the declared matrix shape
    #[error("index ({row}, {col}) out of bounds for {n_rows}x{n_cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        n_rows: usize,
        n_cols: usize,
    },

    /// An intermediate value does not fit in an i64
    #[error("integer overflow at ({row}, {col})")]
    Overflow { row: usize, col: usize },

    /// Input text does not follow the matrix grammar
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// Operation selector is not one of add, subtract, multiply
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SparseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        SparseError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SparseError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for sparse matrix operations
pub type Result<T> = std::result::Result<T, SparseError>;
