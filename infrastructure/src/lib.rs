//! Infrastructure layer for eskai
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP backends, built-in tools, execution
//! history and configuration file loading.

pub mod backends;
pub mod config;
pub mod history;
pub mod tools;

// Re-export commonly used types
pub use backends::{
    BackendConstructor, BackendRegistry, BackendSettings, GeminiBackend, GroqBackend,
    OpenAiBackend, RegistryError,
};
pub use config::{
    CONFIG_TEMPLATE, ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileProvidersConfig, FileReplConfig, FileToolsConfig,
};
pub use history::InMemoryHistory;
pub use tools::{DescribeTool, WebFetchTool, register_builtin_tools};
