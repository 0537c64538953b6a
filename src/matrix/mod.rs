// Matrix data structures and conversions

pub mod config;
pub mod conversion;
pub mod entry;
pub mod sparse;

pub use config::ExecConfig;
pub use entry::{Entry, MatrixData};
pub use sparse::SparseMatrix;
