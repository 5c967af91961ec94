//! Backend descriptors (provider-neutral, I/O-free).
//!
//! A backend is a text-generation service. The domain only knows its
//! identity and which capabilities it advertises; transport lives in
//! the infrastructure layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A capability a backend can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Generate,
    Classify,
    Extract,
    Plan,
    Synthesize,
}

impl Capability {
    pub fn all() -> BTreeSet<Capability> {
        [
            Capability::Generate,
            Capability::Classify,
            Capability::Extract,
            Capability::Plan,
            Capability::Synthesize,
        ]
        .into_iter()
        .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Generate => "generate",
            Capability::Classify => "classify",
            Capability::Extract => "extract",
            Capability::Plan => "plan",
            Capability::Synthesize => "synthesize",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable identity of a configured backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProfile {
    /// Registry name ("openai", "groq", "gemini", ...)
    pub name: String,
    /// Model identifier sent to the provider
    pub model: String,
    /// Default sampling temperature
    pub temperature: f32,
    /// Advertised capabilities
    pub capabilities: BTreeSet<Capability>,
}

impl BackendProfile {
    /// Profile advertising every capability
    pub fn new(name: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            temperature,
            capabilities: Capability::all(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities = capabilities.into_iter().collect();
        self
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Result of a liveness probe against one backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendHealth {
    pub available: bool,
    pub model: String,
    /// "success" or "failed"
    pub last_test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BackendHealth {
    pub fn healthy(model: impl Into<String>) -> Self {
        Self {
            available: true,
            model: model.into(),
            last_test: "success".to_string(),
            error: None,
        }
    }

    pub fn unhealthy(model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            available: false,
            model: model.into(),
            last_test: "failed".to_string(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_to_all_capabilities() {
        let profile = BackendProfile::new("openai", "gpt-4", 0.7);
        assert!(profile.supports(Capability::Classify));
        assert!(profile.supports(Capability::Synthesize));
        assert_eq!(profile.capabilities.len(), 5);
    }

    #[test]
    fn test_profile_restricted_capabilities() {
        let profile = BackendProfile::new("groq", "qwen3-32b", 0.7)
            .with_capabilities([Capability::Generate, Capability::Classify]);
        assert!(profile.supports(Capability::Classify));
        assert!(!profile.supports(Capability::Extract));
    }

    #[test]
    fn test_health_serialization_skips_empty_error() {
        let json = serde_json::to_value(BackendHealth::healthy("gpt-4")).unwrap();
        assert_eq!(json["last_test"], "success");
        assert!(json.get("error").is_none());

        let json = serde_json::to_value(BackendHealth::unhealthy("gpt-4", "401")).unwrap();
        assert_eq!(json["available"], false);
        assert_eq!(json["error"], "401");
    }
}
