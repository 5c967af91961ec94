//! Configuration file loading for eskai
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `ESKAI_` (nested keys split on `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./eskai.toml` or `./.eskai.toml`
//! 4. Global: `$XDG_CONFIG_HOME/eskai/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod template;

pub use file_config::{
    ConfigValidationError, FileConfig, FileExecutionConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig, FileProvidersConfig, FileReplConfig, FileToolsConfig,
    KNOWN_PROVIDERS, LOG_LEVELS, MIN_TIMEOUT_SECONDS, ProviderDefaults,
};
pub use loader::ConfigLoader;
pub use template::CONFIG_TEMPLATE;
