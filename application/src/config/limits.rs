//! Per-request limits.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Limits and context for one `process` call
#[derive(Debug, Clone)]
pub struct ProcessLimits {
    /// Total wall-clock budget; the configured default applies when unset
    pub max_execution_time: Option<Duration>,
    pub enable_internet: bool,
    pub enable_code_execution: bool,
    /// Earlier conversation, passed to intent classification
    pub context: Option<String>,
    pub cancellation: Option<CancellationToken>,
}

impl Default for ProcessLimits {
    fn default() -> Self {
        Self {
            max_execution_time: None,
            enable_internet: true,
            enable_code_execution: true,
            context: None,
            cancellation: None,
        }
    }
}

impl ProcessLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_execution_time(mut self, limit: Duration) -> Self {
        self.max_execution_time = Some(limit);
        self
    }

    pub fn without_internet(mut self) -> Self {
        self.enable_internet = false;
        self
    }

    pub fn without_code_execution(mut self) -> Self {
        self.enable_code_execution = false;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}
