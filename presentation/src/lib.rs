//! Presentation layer for eskai
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive session.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod runner;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, Command, InitConfigArgs, OutputFormat, ProcessArgs};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use runner::run_prompt;
