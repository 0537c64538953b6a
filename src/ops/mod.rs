//! Binary operations over sparse matrices
//!
//! Every operation borrows its operands and returns a freshly built matrix.
//! Nothing is returned on failure; there are no partial results.

mod accumulator;
pub mod elementwise;
pub mod multiply;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SparseError};
use crate::matrix::{ExecConfig, SparseMatrix};

pub use elementwise::{add, add_with, subtract, subtract_with};
pub use multiply::{multiply, multiply_with};

/// Operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        }
    }

    /// Applies the operation with default execution settings
    pub fn apply(&self, a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
        self.apply_with(a, b, &ExecConfig::default())
    }

    pub fn apply_with(
        &self,
        a: &SparseMatrix,
        b: &SparseMatrix,
        config: &ExecConfig,
    ) -> Result<SparseMatrix> {
        match self {
            Operation::Add => add_with(a, b, config),
            Operation::Subtract => subtract_with(a, b, config),
            Operation::Multiply => multiply_with(a, b, config),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = SparseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" | "sub" => Ok(Operation::Subtract),
            "multiply" | "mul" => Ok(Operation::Multiply),
            _ => Err(SparseError::UnsupportedOperation(s.to_string())),
        }
    }
}

/// Applies `op` to `a` and `b`
pub fn apply(op: Operation, a: &SparseMatrix, b: &SparseMatrix) -> Result<SparseMatrix> {
    op.apply(a, b)
}
