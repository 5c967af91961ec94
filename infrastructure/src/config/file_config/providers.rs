//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::backends::BackendSettings;

/// Built-in provider names, in default priority order
pub const KNOWN_PROVIDERS: [&str; 3] = ["openai", "groq", "gemini"];

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Built-in defaults of one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub model: &'static str,
    pub base_url: &'static str,
    pub api_key_env: &'static str,
}

impl ProviderDefaults {
    pub const OPENAI: ProviderDefaults = ProviderDefaults {
        model: "gpt-4",
        base_url: "https://api.openai.com/v1",
        api_key_env: "OPENAI_API_KEY",
    };

    pub const GROQ: ProviderDefaults = ProviderDefaults {
        model: "mixtral-8x7b-32768",
        base_url: "https://api.groq.com/openai/v1",
        api_key_env: "GROQ_API_KEY",
    };

    pub const GEMINI: ProviderDefaults = ProviderDefaults {
        model: "gemini-pro",
        base_url: "https://generativelanguage.googleapis.com/v1beta",
        api_key_env: "GEMINI_API_KEY",
    };

    pub fn for_provider(name: &str) -> Option<ProviderDefaults> {
        match name {
            "openai" => Some(Self::OPENAI),
            "groq" => Some(Self::GROQ),
            "gemini" => Some(Self::GEMINI),
            _ => None,
        }
    }
}

/// One `[providers.<name>]` table. Unset fields fall back to the
/// provider's [`ProviderDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    /// Overrides `[providers] temperature` for this provider
    pub temperature: Option<f32>,
}

impl FileProviderConfig {
    /// Key from the file, else from the configured environment variable
    pub fn resolve_api_key(&self, defaults: &ProviderDefaults) -> Option<String> {
        let env_name = self.api_key_env.as_deref().unwrap_or(defaults.api_key_env);
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(env_name).ok().filter(|k| !k.trim().is_empty()))
    }
}

/// Raw `[providers]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Preferred backends, most preferred first
    pub priority: Vec<String>,
    /// Default sampling temperature
    pub temperature: f32,
    pub openai: FileProviderConfig,
    pub groq: FileProviderConfig,
    pub gemini: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            priority: KNOWN_PROVIDERS.iter().map(|s| s.to_string()).collect(),
            temperature: 0.7,
            openai: FileProviderConfig::default(),
            groq: FileProviderConfig::default(),
            gemini: FileProviderConfig::default(),
        }
    }
}

impl FileProvidersConfig {
    pub fn provider(&self, name: &str) -> Option<&FileProviderConfig> {
        match name {
            "openai" => Some(&self.openai),
            "groq" => Some(&self.groq),
            "gemini" => Some(&self.gemini),
            _ => None,
        }
    }

    /// Resolved connection settings, or `None` when the provider is unknown
    /// or has no API key.
    pub fn backend_settings(&self, name: &str) -> Option<BackendSettings> {
        let config = self.provider(name)?;
        let defaults = ProviderDefaults::for_provider(name)?;
        let api_key = config.resolve_api_key(&defaults)?;

        Some(BackendSettings {
            name: name.to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| defaults.model.to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| defaults.base_url.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            timeout: Duration::from_secs(
                config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
            temperature: config.temperature.unwrap_or(self.temperature),
        })
    }

    /// Names of providers that have an API key available
    pub fn configured(&self) -> Vec<&'static str> {
        KNOWN_PROVIDERS
            .into_iter()
            .filter(|name| {
                self.provider(name)
                    .zip(ProviderDefaults::for_provider(name))
                    .and_then(|(config, defaults)| config.resolve_api_key(&defaults))
                    .is_some()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_use_provider_defaults() {
        let mut config = FileProvidersConfig::default();
        config.groq.api_key = Some("gsk-test".to_string());
        config.groq.api_key_env = Some("ESKAI_TEST_UNSET_GROQ_KEY".to_string());

        let settings = config.backend_settings("groq").unwrap();
        assert_eq!(settings.model, "mixtral-8x7b-32768");
        assert_eq!(settings.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(settings.api_key, "gsk-test");
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(settings.temperature, 0.7);
    }

    #[test]
    fn test_provider_overrides() {
        let toml_str = r#"
temperature = 0.2

[gemini]
model = "gemini-1.5-flash"
base_url = "http://localhost:8080/"
api_key = "g-test"
timeout_seconds = 5
temperature = 1.1
"#;
        let config: FileProvidersConfig = toml::from_str(toml_str).unwrap();
        let settings = config.backend_settings("gemini").unwrap();
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.temperature, 1.1);
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let mut config = FileProvidersConfig::default();
        for name in KNOWN_PROVIDERS {
            let provider = match name {
                "openai" => &mut config.openai,
                "groq" => &mut config.groq,
                _ => &mut config.gemini,
            };
            provider.api_key_env = Some(format!("ESKAI_TEST_UNSET_{name}"));
        }
        config.openai.api_key = Some("  ".to_string());

        assert!(config.backend_settings("openai").is_none());
        assert!(config.configured().is_empty());
        assert!(config.backend_settings("anthropic").is_none());
    }
}
