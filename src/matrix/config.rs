//! Execution parameters for matrix operations

/// Default number of non-empty rows before an operation is split across threads
pub const DEFAULT_PARALLEL_ROW_THRESHOLD: usize = 1024;

/// Controls how operations are executed
///
/// Results do not depend on these settings, only the way rows are scheduled.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Number of threads to use
    pub n_threads: usize,

    /// Minimum number of non-empty input rows before rows are processed in parallel
    pub parallel_row_threshold: usize,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
            parallel_row_threshold: DEFAULT_PARALLEL_ROW_THRESHOLD,
        }
    }
}

impl ExecConfig {
    /// A config that never leaves the calling thread
    pub fn sequential() -> Self {
        Self {
            n_threads: 1,
            parallel_row_threshold: usize::MAX,
        }
    }

    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads.max(1);
        self
    }

    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_row_threshold = rows;
        self
    }

    /// Whether an operation touching `active_rows` non-empty rows should run in parallel
    pub fn use_parallel(&self, active_rows: usize) -> bool {
        self.n_threads > 1 && active_rows >= self.parallel_row_threshold
    }
}
