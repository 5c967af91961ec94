//! System status and execution history records

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::BackendHealth;

/// Static configuration reported by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    pub max_concurrent_agents: usize,
    pub enable_parallel_execution: bool,
    /// Seconds
    pub default_timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub backends: BTreeMap<String, BackendHealth>,
    pub config: StatusConfig,
}

impl SystemStatus {
    pub fn available_backends(&self) -> usize {
        self.backends.values().filter(|h| h.available).count()
    }
}

/// One past pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub execution_id: String,
    pub prompt: String,
    /// Envelope type: chat, objective or error
    pub kind: String,
    pub success: bool,
    pub processing_time: f64,
    pub recorded_at: DateTime<Utc>,
}
