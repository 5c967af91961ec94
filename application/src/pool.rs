//! Backend pool
//!
//! Holds every configured backend, built once at startup and shared
//! read-only by all pipeline runs. Selection follows the configured
//! priority list, then registration order.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use eskai_domain::{BackendHealth, Capability};
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ports::backend::{Backend, BackendError, GenerateOptions};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    #[error("No backend available")]
    NoBackendAvailable,
}

pub struct BackendPool {
    backends: Vec<Arc<dyn Backend>>,
    priority: Vec<String>,
}

impl std::fmt::Debug for BackendPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendPool")
            .field("backends", &self.names())
            .field("priority", &self.priority)
            .finish()
    }
}

impl BackendPool {
    /// Build a pool; an empty backend list is rejected.
    pub fn new(backends: Vec<Arc<dyn Backend>>) -> Result<Self, PoolError> {
        if backends.is_empty() {
            return Err(PoolError::NoBackendAvailable);
        }
        Ok(Self {
            backends,
            priority: Vec::new(),
        })
    }

    /// Preferred backend names, most preferred first
    pub fn with_priority<I, S>(mut self, priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority = priority.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Backend>> {
        self.backends.iter().find(|b| b.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.backends.iter().map(|b| b.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// All backends, priority order first, then the rest in registration order
    pub fn ordered(&self) -> Vec<Arc<dyn Backend>> {
        let mut ordered: Vec<Arc<dyn Backend>> = self
            .priority
            .iter()
            .filter_map(|name| self.get(name))
            .collect();
        for backend in &self.backends {
            if !ordered.iter().any(|b| b.name() == backend.name()) {
                ordered.push(Arc::clone(backend));
            }
        }
        ordered
    }

    /// Backends advertising a capability, in [`ordered`](Self::ordered) order
    pub fn with_capability(&self, capability: Capability) -> Vec<Arc<dyn Backend>> {
        self.ordered()
            .into_iter()
            .filter(|b| b.profile().supports(capability))
            .collect()
    }

    /// The first backend in priority order
    pub fn primary(&self) -> Result<Arc<dyn Backend>, PoolError> {
        self.ordered()
            .into_iter()
            .next()
            .ok_or(PoolError::NoBackendAvailable)
    }

    /// Try every backend in order; fail only when all of them fail.
    ///
    /// Returns the answering backend's name with the text. The error is
    /// the last backend's error.
    pub async fn generate_with_failover(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<(String, String), BackendError> {
        let mut last_error = BackendError::NotConfigured("no backend in pool".to_string());
        for backend in self.ordered() {
            match backend.generate(prompt, options).await {
                Ok(text) => {
                    debug!(backend = backend.name(), "Failover generate answered");
                    return Ok((backend.name().to_string(), text));
                }
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "Backend failed, trying next");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Probe every backend concurrently.
    ///
    /// Probe failures and timeouts are recorded, never returned.
    pub async fn status(&self, probe_timeout: Duration) -> BTreeMap<String, BackendHealth> {
        let probes = self.backends.iter().map(|backend| {
            let backend = Arc::clone(backend);
            async move {
                let options = GenerateOptions::new().with_max_tokens(5);
                let model = backend.profile().model.clone();
                let health =
                    match tokio::time::timeout(probe_timeout, backend.generate("Hello", &options))
                        .await
                    {
                        Ok(Ok(_)) => BackendHealth::healthy(model),
                        Ok(Err(e)) => BackendHealth::unhealthy(model, e.to_string()),
                        Err(_) => BackendHealth::unhealthy(model, BackendError::Timeout.to_string()),
                    };
                (backend.name().to_string(), health)
            }
        });
        join_all(probes).await.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eskai_domain::BackendProfile;

    struct StubBackend {
        profile: BackendProfile,
        fail: bool,
    }

    #[async_trait]
    impl Backend for StubBackend {
        fn profile(&self) -> &BackendProfile {
            &self.profile
        }

        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerateOptions,
        ) -> Result<String, BackendError> {
            if self.fail {
                Err(BackendError::RequestFailed(format!("{} down", self.profile.name)))
            } else {
                Ok(format!("from {}", self.profile.name))
            }
        }
    }

    fn stub(name: &str, fail: bool) -> Arc<dyn Backend> {
        Arc::new(StubBackend {
            profile: BackendProfile::new(name, format!("{name}-model"), 0.7),
            fail,
        })
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert_eq!(
            BackendPool::new(Vec::new()).unwrap_err(),
            PoolError::NoBackendAvailable
        );
    }

    #[test]
    fn test_primary_follows_priority() {
        let pool = BackendPool::new(vec![stub("groq", false), stub("openai", false)])
            .unwrap()
            .with_priority(["openai", "groq"]);
        assert_eq!(pool.primary().unwrap().name(), "openai");

        let unprioritised =
            BackendPool::new(vec![stub("groq", false), stub("openai", false)]).unwrap();
        assert_eq!(unprioritised.primary().unwrap().name(), "groq");
    }

    #[test]
    fn test_priority_ignores_unknown_names() {
        let pool = BackendPool::new(vec![stub("gemini", false)])
            .unwrap()
            .with_priority(["openai", "gemini"]);
        assert_eq!(pool.primary().unwrap().name(), "gemini");
        assert_eq!(pool.ordered().len(), 1);
        assert!(pool.get("openai").is_none());
    }

    #[tokio::test]
    async fn test_failover_skips_failures() {
        let pool = BackendPool::new(vec![stub("openai", true), stub("groq", false)]).unwrap();
        let (name, text) = pool
            .generate_with_failover("hi", &GenerateOptions::new())
            .await
            .unwrap();
        assert_eq!(name, "groq");
        assert_eq!(text, "from groq");
    }

    #[tokio::test]
    async fn test_failover_reports_last_error() {
        let pool = BackendPool::new(vec![stub("openai", true), stub("groq", true)]).unwrap();
        let err = pool
            .generate_with_failover("hi", &GenerateOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::RequestFailed("groq down".into()));
    }

    #[tokio::test]
    async fn test_status_records_failures() {
        let pool = BackendPool::new(vec![stub("openai", false), stub("groq", true)]).unwrap();
        let status = pool.status(Duration::from_secs(1)).await;
        assert!(status["openai"].available);
        assert_eq!(status["openai"].model, "openai-model");
        assert!(!status["groq"].available);
        assert_eq!(status["groq"].last_test, "failed");
        assert!(status["groq"].error.as_deref().unwrap().contains("groq down"));
    }
}
