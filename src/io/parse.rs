//! Reader for the plaintext matrix format
//!
//! ```text
//! rows=<n>
//! cols=<n>
//! (<row>, <col>, <value>)
//! ...
//! ```
//!
//! Lines are trimmed and blank lines are ignored. Line numbers in errors
//! count every physical line, blank ones included.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SparseError};
use crate::matrix::{Entry, MatrixData, SparseMatrix};

/// Parses matrix text into its dimensions and entry list
///
/// # Examples
///
/// ```
/// use sparsecalc::io::parse_str;
///
/// let data = parse_str("rows=3\ncols=4\n(0, 1, -7)\n\n(2, 3, 9)\n").unwrap();
/// assert_eq!((data.n_rows, data.n_cols), (3, 4));
/// assert_eq!(data.entries.len(), 2);
/// ```
pub fn parse_str(input: &str) -> Result<MatrixData> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let n_rows = parse_header(lines.next(), "rows")?;
    let n_cols = parse_header(lines.next(), "cols")?;

    let entries = lines
        .map(|(line_no, line)| parse_entry(line_no, line))
        .collect::<Result<Vec<_>>>()?;

    Ok(MatrixData {
        n_rows,
        n_cols,
        entries,
    })
}

/// Reads and parses a matrix file
pub fn read_matrix(path: impl AsRef<Path>) -> Result<MatrixData> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| SparseError::io(path, e))?;
    let data = parse_str(&text)?;
    debug!(
        path = %path.display(),
        rows = data.n_rows,
        cols = data.n_cols,
        entries = data.entries.len(),
        "read matrix"
    );
    Ok(data)
}

/// Reads a matrix file and builds the sparse matrix, rejecting out-of-range entries
pub fn load_matrix(path: impl AsRef<Path>) -> Result<SparseMatrix> {
    SparseMatrix::from_data(read_matrix(path)?)
}

fn parse_header(line: Option<(usize, &str)>, key: &str) -> Result<usize> {
    // Missing headers have no line to point at and are reported as line 0
    let (line_no, line) = line.ok_or_else(|| {
        SparseError::malformed(0, format!("missing `{key}=` header"))
    })?;

    let value = line
        .strip_prefix(key)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| {
            SparseError::malformed(line_no, format!("expected `{key}=<n>`, found `{line}`"))
        })?;

    value.trim().parse::<usize>().map_err(|_| {
        SparseError::malformed(
            line_no,
            format!("`{key}` must be a non-negative integer, found `{}`", value.trim()),
        )
    })
}

fn parse_entry(line_no: usize, line: &str) -> Result<Entry> {
    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| {
            SparseError::malformed(line_no, format!("expected `(row, col, value)`, found `{line}`"))
        })?;

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let &[row, col, value] = parts.as_slice() else {
        return Err(SparseError::malformed(
            line_no,
            format!("expected 3 fields, found {}", parts.len()),
        ));
    };

    let index = |field: &str, name: &str| {
        field.parse::<usize>().map_err(|_| {
            SparseError::malformed(
                line_no,
                format!("{name} must be a non-negative integer, found `{field}`"),
            )
        })
    };

    let row = index(row, "row")?;
    let col = index(col, "col")?;
    let value = value.parse::<i64>().map_err(|_| {
        SparseError::malformed(line_no, format!("value must be an integer, found `{value}`"))
    })?;

    Ok(Entry { row, col, value })
}
