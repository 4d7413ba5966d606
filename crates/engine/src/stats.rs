use crate::report::SortedReport;
use serde::Serialize;
use std::time::Duration;

/// Bookkeeping for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Data rows handed to the workers (header and unreadable lines excluded).
    pub records_read: u64,
    pub valid_records: u64,
    pub invalid_records: u64,
    /// Lines the reader could not decode and skipped.
    pub read_errors: u64,
    pub elapsed: Duration,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub report: SortedReport,
    pub summary: RunSummary,
}
