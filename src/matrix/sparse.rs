//! Coordinate-keyed sparse matrix
//!
//! Storage is a two-level ordered map, row index to (column index to value).
//! Only non-zero values are ever stored and rows without entries are not
//! kept, so `nnz()` is always the number of logically non-zero cells.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::error::{Result, SparseError};
use crate::matrix::entry::{Entry, MatrixData};

/// A sparse integer matrix
///
/// Entries are enumerated in ascending `(row, col)` order regardless of the
/// order they were inserted in.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    /// Number of rows in the matrix
    pub(crate) n_rows: usize,

    /// Number of columns in the matrix
    pub(crate) n_cols: usize,

    /// row -> (col -> non-zero value)
    pub(crate) rows: BTreeMap<usize, BTreeMap<usize, i64>>,
}

impl SparseMatrix {
    /// Creates an empty matrix with the given dimensions
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: BTreeMap::new(),
        }
    }

    /// Builds a matrix from a sequence of triples
    ///
    /// Triples are applied in order: a later triple for the same coordinate
    /// replaces the earlier one, and a zero-valued triple clears it.
    ///
    /// # Errors
    ///
    /// Returns [`SparseError::IndexOutOfBounds`] if any coordinate lies
    /// outside `n_rows x n_cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparsecalc::{Entry, SparseMatrix};
    ///
    /// let m = SparseMatrix::from_entries(2, 2, [Entry::new(0, 1, 4), Entry::new(0, 1, 7)]).unwrap();
    /// assert_eq!(m.get(0, 1), 7);
    /// assert_eq!(m.nnz(), 1);
    /// ```
    pub fn from_entries<I>(n_rows: usize, n_cols: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut matrix = Self::new(n_rows, n_cols);
        for entry in entries {
            let Entry { row, col, value } = entry.into();
            matrix.try_set(row, col, value)?;
        }
        trace!(n_rows, n_cols, nnz = matrix.nnz(), "built sparse matrix");
        Ok(matrix)
    }

    /// Builds a matrix from triples without checking coordinates against the shape
    pub fn from_entries_unchecked<I>(n_rows: usize, n_cols: usize, entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        let mut matrix = Self::new(n_rows, n_cols);
        for entry in entries {
            let Entry { row, col, value } = entry.into();
            matrix.set(row, col, value);
        }
        matrix
    }

    /// Assembles a matrix from finished rows, skipping rows left empty
    pub(crate) fn from_rows<I>(n_rows: usize, n_cols: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = (usize, BTreeMap<usize, i64>)>,
    {
        Self {
            n_rows,
            n_cols,
            rows: rows.into_iter().filter(|(_, cols)| !cols.is_empty()).collect(),
        }
    }

    /// Builds a matrix from parsed input
    pub fn from_data(data: MatrixData) -> Result<Self> {
        Self::from_entries(data.n_rows, data.n_cols, data.entries)
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Matrix dimensions as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of stored (non-zero) elements
    pub fn nnz(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// True if no entry is stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows holding at least one entry
    pub fn non_empty_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the value at `(row, col)`, or 0 when nothing is stored there
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.rows
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .copied()
            .unwrap_or(0)
    }

    /// Writes `value` at `(row, col)`
    ///
    /// Writing zero removes whatever was stored there, and drops the row
    /// entirely once it has no entries left. No bounds check is done; use
    /// [`try_set`](Self::try_set) for untrusted coordinates.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        if value != 0 {
            self.rows.entry(row).or_default().insert(col, value);
            return;
        }

        if let Some(cols) = self.rows.get_mut(&row) {
            cols.remove(&col);
            if cols.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    /// Bounds-checked [`set`](Self::set)
    pub fn try_set(&mut self, row: usize, col: usize, value: i64) -> Result<()> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(SparseError::IndexOutOfBounds {
                row,
                col,
                n_rows: self.n_rows,
                n_cols: self.n_cols,
            });
        }
        self.set(row, col, value);
        Ok(())
    }

    /// Returns an iterator over the stored entries in row i
    ///
    /// Each item is a tuple (col, value). Rows without entries yield nothing.
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.rows
            .get(&i)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, &value)| (col, value)))
    }

    /// Iterates over `(row, columns)` for every row holding entries
    pub(crate) fn rows(&self) -> impl Iterator<Item = (usize, &BTreeMap<usize, i64>)> + '_ {
        self.rows.iter().map(|(&row, cols)| (row, cols))
    }

    /// Enumerates every stored entry in ascending `(row, col)` order
    ///
    /// The iterator borrows the matrix, so it can be recreated as often as
    /// needed.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, &value)| Entry { row, col, value })
        })
    }

    /// Canonical triple listing, same as [`entries`](Self::entries)
    pub fn serialize(&self) -> impl Iterator<Item = Entry> + '_ {
        self.entries()
    }

    /// Converts back into the input contract
    pub fn to_data(&self) -> MatrixData {
        MatrixData {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            entries: self.entries().collect(),
        }
    }
}

/// Header line followed by one `(r, c, v)` line per entry
impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}, Cols: {}", self.n_rows, self.n_cols)?;
        for entry in self.entries() {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl fmt::Debug for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_rows_to_print = 5;
        if !self.rows.is_empty() {
            writeln!(f, "  content sample:")?;

            for (row, cols) in self.rows.iter().take(max_rows_to_print) {
                write!(f, "    row {}: ", row)?;
                let max_elements = 5.min(cols.len());
                for (col, value) in cols.iter().take(max_elements) {
                    write!(f, "({}, {}) ", col, value)?;
                }
                if cols.len() > max_elements {
                    write!(f, "... ({} more)", cols.len() - max_elements)?;
                }
                writeln!(f)?;
            }

            if self.rows.len() > max_rows_to_print {
                writeln!(
                    f,
                    "    ... ({} more rows)",
                    self.rows.len() - max_rows_to_print
                )?;
            }
        }

        write!(f, "}}")
    }
}
