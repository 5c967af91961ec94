//! Tools configuration from TOML (`[tools]` section)

use serde::{Deserialize, Serialize};

/// Raw tools configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Allow agents to fetch web pages
    pub enable_internet: bool,
    /// Allow agents to run code; no code tool ships yet, so this only
    /// controls whether `code` is kept in agent tool lists
    pub enable_code_execution: bool,
    pub fetch_timeout_seconds: u64,
    /// Fetched text is cut to this many bytes
    pub max_fetch_bytes: usize,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            enable_internet: true,
            enable_code_execution: true,
            fetch_timeout_seconds: 30,
            max_fetch_bytes: 50 * 1024,
        }
    }
}
