//! Output files and listings for result matrices

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SparseError};
use crate::matrix::SparseMatrix;

/// What goes into a result file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Only `rows: R` and `cols: C`
    #[default]
    Dimensions,
    /// The full matrix in the input format, readable by [`parse_str`](super::parse_str)
    Full,
}

/// `rows: R\ncols: C`
pub fn format_dimensions(matrix: &SparseMatrix) -> String {
    format!("rows: {}\ncols: {}", matrix.n_rows(), matrix.n_cols())
}

/// The matrix in the same text format the parser reads
pub fn format_matrix(matrix: &SparseMatrix) -> String {
    let mut out = format!("rows={}\ncols={}\n", matrix.n_rows(), matrix.n_cols());
    for entry in matrix.entries() {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}

/// Writes `matrix` to `path`, creating parent directories as needed
pub fn write_result(path: impl AsRef<Path>, matrix: &SparseMatrix, mode: WriteMode) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SparseError::io(parent, e))?;
    }

    let contents = match mode {
        WriteMode::Dimensions => format_dimensions(matrix),
        WriteMode::Full => format_matrix(matrix),
    };
    fs::write(path, contents).map_err(|e| SparseError::io(path, e))?;

    debug!(path = %path.display(), ?mode, nnz = matrix.nnz(), "wrote result");
    Ok(())
}

/// `<dir>/<stem a>_<stem b>_results.txt`
pub fn default_output_path(dir: impl AsRef<Path>, a: impl AsRef<Path>, b: impl AsRef<Path>) -> PathBuf {
    let stem = |p: &Path| {
        p.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "matrix".to_string())
    };
    dir.as_ref()
        .join(format!("{}_{}_results.txt", stem(a.as_ref()), stem(b.as_ref())))
}
