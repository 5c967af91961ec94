//! Tool action port
//!
//! A tool action is one `(tool, action)` pair, such as `internet/fetch`.
//! Implementations live in the infrastructure layer and are registered in
//! a [`ToolTable`](crate::tools::ToolTable).

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Unknown tool action: {tool}/{action}")]
    Unknown { tool: String, action: String },

    #[error("Tool action already registered: {tool}/{action}")]
    DuplicateRegistration { tool: String, action: String },

    #[error("Tool is disabled: {0}")]
    Disabled(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

/// One executable tool action
#[async_trait]
pub trait ToolAction: Send + Sync {
    /// Short human-readable description
    fn description(&self) -> &str;

    /// Run the action with JSON arguments
    async fn invoke(&self, args: &Value) -> Result<Value, ToolError>;
}
