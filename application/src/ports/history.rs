//! Execution history port
//!
//! Persisting past runs is not part of the pipeline itself; an adapter may
//! be injected later. The default [`NoHistory`] stores nothing.

use eskai_domain::HistoryEntry;

/// Port for recording and reading past pipeline runs.
///
/// `record` is synchronous and non-fallible so a broken store never
/// disrupts a run.
pub trait ExecutionHistory: Send + Sync {
    fn record(&self, entry: HistoryEntry);

    /// Most recent entries first, at most `limit`
    fn recent(&self, limit: usize) -> Vec<HistoryEntry>;
}

/// Stores nothing; `recent` is always empty
pub struct NoHistory;

impl ExecutionHistory for NoHistory {
    fn record(&self, _entry: HistoryEntry) {}

    fn recent(&self, _limit: usize) -> Vec<HistoryEntry> {
        Vec::new()
    }
}
