//! Reading matrix files and writing results

pub mod parse;
pub mod write;

pub use parse::{load_matrix, parse_str, read_matrix};
pub use write::{default_output_path, format_dimensions, format_matrix, write_result, WriteMode};
