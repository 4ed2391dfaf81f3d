//! Result of an extraction run.

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages received from Confluence.
    pub fetched: usize,
    /// Rows written to the output table.
    pub rows_written: usize,
    /// Start timestamp the pages were filtered by.
    pub started_from: String,
    /// `last_run` persisted for the next run.
    pub last_run: String,
    /// Whether the table is loaded incrementally.
    pub incremental: bool,
}
