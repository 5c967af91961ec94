//! Backend registry
//!
//! Maps provider names to constructors and builds the pool once at startup.
//! A provider without an API key is skipped, not an error.

use std::sync::Arc;

use eskai_application::{Backend, BackendError, BackendPool};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{BackendSettings, GeminiBackend, GroqBackend, OpenAiBackend};
use crate::config::FileProvidersConfig;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Failed to create backend {name}: {source}")]
    Construction { name: String, source: BackendError },

    #[error("No backend available: no provider has an API key configured")]
    NoBackendAvailable,
}

/// Builds a backend from resolved settings
pub type BackendConstructor = fn(BackendSettings) -> Result<Arc<dyn Backend>, BackendError>;

/// Name → constructor table, in registration order
pub struct BackendRegistry {
    constructors: Vec<(String, BackendConstructor)>,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("openai", |s| Ok(Arc::new(OpenAiBackend::new(s)?)));
        registry.register("groq", |s| Ok(Arc::new(GroqBackend::new(s)?)));
        registry.register("gemini", |s| Ok(Arc::new(GeminiBackend::new(s)?)));
        registry
    }
}

impl BackendRegistry {
    /// Registry with the built-in providers
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            constructors: Vec::new(),
        }
    }

    /// Register or replace a constructor
    pub fn register(&mut self, name: &str, constructor: BackendConstructor) {
        match self.constructors.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = constructor,
            None => self.constructors.push((name.to_string(), constructor)),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.constructors.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn build(&self, settings: BackendSettings) -> Result<Arc<dyn Backend>, RegistryError> {
        let constructor = self
            .constructors
            .iter()
            .find(|(n, _)| *n == settings.name)
            .map(|(_, c)| *c)
            .ok_or_else(|| RegistryError::UnknownProvider(settings.name.clone()))?;
        let name = settings.name.clone();
        constructor(settings).map_err(|source| RegistryError::Construction { name, source })
    }

    /// Build every registered provider that has an API key.
    ///
    /// Unknown names in the priority list are rejected.
    pub fn build_pool(&self, config: &FileProvidersConfig) -> Result<BackendPool, RegistryError> {
        if let Some(unknown) = config
            .priority
            .iter()
            .find(|name| !self.constructors.iter().any(|(n, _)| n == *name))
        {
            return Err(RegistryError::UnknownProvider(unknown.clone()));
        }

        let mut backends = Vec::new();
        for (name, _) in &self.constructors {
            let Some(settings) = config.backend_settings(name) else {
                debug!(backend = %name, "No API key, backend not registered");
                continue;
            };
            match self.build(settings) {
                Ok(backend) => backends.push(backend),
                Err(e) => warn!(backend = %name, error = %e, "Backend skipped"),
            }
        }

        let names: Vec<String> = backends.iter().map(|b| b.name().to_string()).collect();
        let pool = BackendPool::new(backends)
            .map_err(|_| RegistryError::NoBackendAvailable)?
            .with_priority(config.priority.iter().cloned());
        info!(backends = ?names, "Backend pool ready");
        Ok(pool)
    }
}
