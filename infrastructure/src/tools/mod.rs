//! Built-in tool actions
//!
//! | Tool | Action | Registered when |
//! |------|--------|-----------------|
//! | `internet` | `fetch` | `tools.enable_internet` |
//! | `analysis` | `describe` | always |
//!
//! `code` has no action: sandboxed execution is not provided, so agents
//! never get it bound even when the flag is on.

mod analysis;
mod web_fetch;

pub use analysis::DescribeTool;
pub use web_fetch::{DEFAULT_MAX_BYTES, WebFetchTool, html_to_text};

use std::sync::Arc;
use std::time::Duration;

use eskai_application::{ToolError, ToolTable};

use crate::config::FileToolsConfig;

/// Register every built-in action enabled by `config`
pub fn register_builtin_tools(
    table: &mut ToolTable,
    config: &FileToolsConfig,
) -> Result<(), ToolError> {
    if config.enable_internet {
        let fetch = WebFetchTool::new(
            Duration::from_secs(config.fetch_timeout_seconds.max(1)),
            config.max_fetch_bytes,
        )?;
        table.register("internet", "fetch", Arc::new(fetch))?;
    }
    table.register("analysis", "describe", Arc::new(DescribeTool))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_defaults() {
        let mut table = ToolTable::new();
        register_builtin_tools(&mut table, &FileToolsConfig::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_tool("internet"));
        assert!(table.has_tool("analysis"));
        assert!(!table.has_tool("code"));
    }

    #[test]
    fn test_internet_disabled() {
        let mut table = ToolTable::new();
        let config = FileToolsConfig {
            enable_internet: false,
            ..FileToolsConfig::default()
        };
        register_builtin_tools(&mut table, &config).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.has_tool("analysis"));
        assert!(!table.has_tool("internet"));
    }

    #[test]
    fn test_double_registration_fails() {
        let mut table = ToolTable::new();
        let config = FileToolsConfig::default();
        register_builtin_tools(&mut table, &config).unwrap();
        assert!(matches!(
            register_builtin_tools(&mut table, &config),
            Err(ToolError::DuplicateRegistration { .. })
        ));
    }
}
