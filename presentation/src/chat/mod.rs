//! Interactive chat module
//!
//! Provides a readline-based interactive session over the pipeline.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
