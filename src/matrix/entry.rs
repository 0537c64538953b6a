//! Coordinate triples

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single `(row, col, value)` cell of a sparse matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entry {
    pub row: usize,
    pub col: usize,
    pub value: i64,
}

impl Entry {
    pub fn new(row: usize, col: usize, value: i64) -> Self {
        Self { row, col, value }
    }
}

impl From<(usize, usize, i64)> for Entry {
    fn from((row, col, value): (usize, usize, i64)) -> Self {
        Self { row, col, value }
    }
}

/// Formats the entry the same way the input grammar spells it: `(r, c, v)`
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.row, self.col, self.value)
    }
}

/// Parsed matrix before it is turned into a [`SparseMatrix`](crate::SparseMatrix)
///
/// Entries keep the order they were read in, so duplicate coordinates
/// resolve to the last one supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatrixData {
    pub n_rows: usize,
    pub n_cols: usize,
    pub entries: Vec<Entry>,
}
