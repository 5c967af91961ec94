//! In-memory execution history
//!
//! Keeps the most recent runs of this process in a bounded ring.

use std::collections::VecDeque;
use std::sync::Mutex;

use eskai_application::ExecutionHistory;
use eskai_domain::HistoryEntry;
use tracing::warn;

/// Default number of runs kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded, thread-safe history; the oldest entry is dropped when full.
pub struct InMemoryHistory {
    entries: Mutex<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl InMemoryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ExecutionHistory for InMemoryHistory {
    fn record(&self, entry: HistoryEntry) {
        let Ok(mut entries) = self.entries.lock() else {
            warn!(execution_id = %entry.execution_id, "History lock poisoned, entry dropped");
            return;
        };
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|entries| entries.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}
