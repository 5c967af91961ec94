//! Pipeline configuration container.

use crate::config::ExecutionParams;

/// Static configuration the [`Pipeline`](crate::use_cases::process_prompt::Pipeline)
/// is built with.
///
/// Tool switches here are upper bounds: a request can disable a tool the
/// configuration enables, never the other way round.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub execution: ExecutionParams,
    pub enable_internet: bool,
    pub enable_code_execution: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionParams::default(),
            enable_internet: true,
            enable_code_execution: true,
        }
    }
}

impl PipelineConfig {
    pub fn new(execution: ExecutionParams) -> Self {
        Self {
            execution,
            ..Default::default()
        }
    }

    pub fn with_internet(mut self, enabled: bool) -> Self {
        self.enable_internet = enabled;
        self
    }

    pub fn with_code_execution(mut self, enabled: bool) -> Self {
        self.enable_code_execution = enabled;
        self
    }
}
