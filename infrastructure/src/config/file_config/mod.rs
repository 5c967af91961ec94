//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! once loaded.

mod execution;
mod logging;
mod output;
mod providers;
mod tools;

pub use execution::FileExecutionConfig;
pub use logging::{FileLoggingConfig, LOG_LEVELS};
pub use output::{FileOutputConfig, FileOutputFormat, FileReplConfig};
pub use providers::{FileProviderConfig, FileProvidersConfig, KNOWN_PROVIDERS, ProviderDefaults};
pub use tools::FileToolsConfig;

use eskai_application::PipelineConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest accepted whole-run budget
pub const MIN_TIMEOUT_SECONDS: u64 = 60;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error(
        "no backend API key found; set OPENAI_API_KEY, GROQ_API_KEY or GEMINI_API_KEY (or the configured api_key_env)"
    )]
    NoBackendKey,

    #[error("execution.max_concurrent_agents must be at least 1")]
    InvalidConcurrency,

    #[error("execution.timeout_seconds must be at least 60 (got {0})")]
    TimeoutTooShort(u64),

    #[error("{field} must be within [0, 2] (got {value})")]
    TemperatureOutOfRange { field: String, value: f32 },

    #[error("logging.level: unknown level '{0}'")]
    UnknownLogLevel(String),

    #[error("providers.priority: unknown provider '{0}'")]
    UnknownProvider(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub providers: FileProvidersConfig,
    pub execution: FileExecutionConfig,
    pub tools: FileToolsConfig,
    pub logging: FileLoggingConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.providers.configured().is_empty() {
            errors.push(ConfigValidationError::NoBackendKey);
        }
        if self.execution.max_concurrent_agents < 1 {
            errors.push(ConfigValidationError::InvalidConcurrency);
        }
        if self.execution.timeout_seconds < MIN_TIMEOUT_SECONDS {
            errors.push(ConfigValidationError::TimeoutTooShort(
                self.execution.timeout_seconds,
            ));
        }

        let temperatures = std::iter::once((
            "providers.temperature".to_string(),
            Some(self.providers.temperature),
        ))
        .chain(KNOWN_PROVIDERS.iter().map(|name| {
            (
                format!("providers.{name}.temperature"),
                self.providers.provider(name).and_then(|p| p.temperature),
            )
        }));
        for (field, value) in temperatures {
            if let Some(value) = value
                && !(0.0..=2.0).contains(&value)
            {
                errors.push(ConfigValidationError::TemperatureOutOfRange { field, value });
            }
        }

        if !self.logging.is_valid_level() {
            errors.push(ConfigValidationError::UnknownLogLevel(
                self.logging.level.clone(),
            ));
        }
        for name in &self.providers.priority {
            if !KNOWN_PROVIDERS.contains(&name.as_str()) {
                errors.push(ConfigValidationError::UnknownProvider(name.clone()));
            }
        }

        errors
    }

    /// Static pipeline configuration
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.execution.to_execution_params())
            .with_internet(self.tools.enable_internet)
            .with_code_execution(self.tools.enable_code_execution)
    }
}
