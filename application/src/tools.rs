//! Tool table
//!
//! Explicit mapping from `(tool, action)` to a registered action. Names are
//! checked at registration and again when agents are bound to tools, so an
//! unknown pair fails fast with a typed error.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::ports::tool::{ToolAction, ToolError};

#[derive(Default, Clone)]
pub struct ToolTable {
    actions: BTreeMap<(String, String), Arc<dyn ToolAction>>,
}

impl std::fmt::Debug for ToolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.actions.keys()).finish()
    }
}

impl ToolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action; registering the same pair twice is an error.
    pub fn register(
        &mut self,
        tool: &str,
        action: &str,
        handler: Arc<dyn ToolAction>,
    ) -> Result<(), ToolError> {
        let key = (tool.to_string(), action.to_string());
        if self.actions.contains_key(&key) {
            return Err(ToolError::DuplicateRegistration {
                tool: tool.to_string(),
                action: action.to_string(),
            });
        }
        debug!(tool, action, "Registered tool action");
        self.actions.insert(key, handler);
        Ok(())
    }

    pub fn resolve(&self, tool: &str, action: &str) -> Result<Arc<dyn ToolAction>, ToolError> {
        self.actions
            .get(&(tool.to_string(), action.to_string()))
            .cloned()
            .ok_or_else(|| ToolError::Unknown {
                tool: tool.to_string(),
                action: action.to_string(),
            })
    }

    pub async fn invoke(&self, tool: &str, action: &str, args: &Value) -> Result<Value, ToolError> {
        let handler = self.resolve(tool, action)?;
        handler.invoke(args).await
    }

    pub fn has_tool(&self, tool: &str) -> bool {
        self.actions.keys().any(|(t, _)| t == tool)
    }

    /// Every tool name must have at least one registered action
    pub fn validate(&self, tools: &[String]) -> Result<(), ToolError> {
        match tools.iter().find(|t| !self.has_tool(t)) {
            Some(missing) => Err(ToolError::Unknown {
                tool: missing.clone(),
                action: "*".to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl ToolAction for Echo {
        fn description(&self) -> &str {
            "echo"
        }

        async fn invoke(&self, args: &Value) -> Result<Value, ToolError> {
            Ok(args.clone())
        }
    }

    fn table() -> ToolTable {
        let mut table = ToolTable::new();
        table.register("internet", "fetch", Arc::new(Echo)).unwrap();
        table.register("analysis", "describe", Arc::new(Echo)).unwrap();
        table
    }

    #[test]
    fn test_duplicate_registration() {
        let mut t = table();
        assert_eq!(
            t.register("internet", "fetch", Arc::new(Echo)).unwrap_err(),
            ToolError::DuplicateRegistration {
                tool: "internet".into(),
                action: "fetch".into()
            }
        );
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_resolve_unknown() {
        let err = table().resolve("internet", "search").err().unwrap();
        assert_eq!(
            err,
            ToolError::Unknown {
                tool: "internet".into(),
                action: "search".into()
            }
        );
    }

    #[tokio::test]
    async fn test_invoke() {
        let out = table()
            .invoke("analysis", "describe", &json!({"data": [1, 2]}))
            .await
            .unwrap();
        assert_eq!(out, json!({"data": [1, 2]}));
    }

    #[test]
    fn test_names_and_validate() {
        let t = table();
        assert!(t.has_tool("internet"));
        assert!(t.has_tool("analysis"));
        assert!(!t.has_tool("code"));
        assert!(t.validate(&["internet".into(), "analysis".into()]).is_ok());
        assert!(matches!(
            t.validate(&["code".into()]),
            Err(ToolError::Unknown { tool, .. }) if tool == "code"
        ));
    }
}
