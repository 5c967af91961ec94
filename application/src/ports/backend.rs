//! Backend port
//!
//! Defines the capability interface every text-generation backend
//! implements. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use eskai_domain::{BackendProfile, PromptTemplate};
use thiserror::Error;

/// Errors that can occur during a backend call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),
}

impl BackendError {
    /// Whether retrying the same call could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::RequestFailed(_) | BackendError::InvalidResponse(_) => true,
            BackendError::Http { status, .. } => *status == 429 || *status >= 500,
            BackendError::Timeout | BackendError::NotConfigured(_) => false,
        }
    }
}

/// Per-call generation options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    pub max_tokens: Option<u32>,
    /// Overrides the profile temperature
    pub temperature: Option<f32>,
    /// System instruction sent ahead of the prompt
    pub system: Option<String>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A text-generation backend
///
/// Only [`generate`](Backend::generate) is required; the stage
/// capabilities are built on it with the stage prompt templates.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Identity, model and advertised capabilities
    fn profile(&self) -> &BackendProfile;

    fn name(&self) -> &str {
        &self.profile().name
    }

    /// General completion
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, BackendError>;

    /// Classify a prompt; expected to answer `{intent, confidence, reasoning}`
    async fn classify_intent(
        &self,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<String, BackendError> {
        let options = GenerateOptions::new()
            .with_max_tokens(150)
            .with_temperature(0.1);
        self.generate(&PromptTemplate::intent_assessment(prompt, context), &options)
            .await
    }

    /// Extract structured objectives from a prompt
    async fn extract_objectives(&self, prompt: &str) -> Result<String, BackendError> {
        let options = GenerateOptions::new()
            .with_max_tokens(500)
            .with_temperature(0.3);
        self.generate(&PromptTemplate::objective_extraction(prompt), &options)
            .await
    }

    /// Combine agent outputs into one answer
    async fn synthesize(
        &self,
        agent_outputs: &[String],
        objectives: &[String],
    ) -> Result<String, BackendError> {
        let options = GenerateOptions::new()
            .with_max_tokens(2000)
            .with_temperature(0.4);
        self.generate(&PromptTemplate::synthesis(objectives, agent_outputs), &options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingBackend {
        profile: BackendProfile,
        calls: Mutex<Vec<(String, GenerateOptions)>>,
    }

    #[async_trait]
    impl Backend for RecordingBackend {
        fn profile(&self) -> &BackendProfile {
            &self.profile
        }

        async fn generate(
            &self,
            prompt: &str,
            options: &GenerateOptions,
        ) -> Result<String, BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), options.clone()));
            Ok("ok".to_string())
        }
    }

    fn backend() -> RecordingBackend {
        RecordingBackend {
            profile: BackendProfile::new("mock", "mock-1", 0.7),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_classify_uses_low_temperature_and_context() {
        let b = backend();
        b.classify_intent("Plan a trip", Some("earlier chat")).await.unwrap();
        let calls = b.calls.lock().unwrap();
        assert_eq!(calls[0].1.temperature, Some(0.1));
        assert!(calls[0].0.contains("Plan a trip"));
        assert!(calls[0].0.contains("Previous context: earlier chat"));
    }

    #[tokio::test]
    async fn test_extract_and_synthesize_temperatures() {
        let b = backend();
        b.extract_objectives("x").await.unwrap();
        b.synthesize(&["out".into()], &["obj".into()]).await.unwrap();
        let calls = b.calls.lock().unwrap();
        assert_eq!(calls[0].1.temperature, Some(0.3));
        assert_eq!(calls[1].1.temperature, Some(0.4));
        assert!(calls[1].0.contains("Agent 1 Output: out"));
        assert_eq!(b.name(), "mock");
    }

    #[test]
    fn test_retryable() {
        assert!(BackendError::RequestFailed("x".into()).is_retryable());
        assert!(BackendError::Http { status: 503, message: String::new() }.is_retryable());
        assert!(!BackendError::Http { status: 401, message: String::new() }.is_retryable());
        assert!(!BackendError::Timeout.is_retryable());
    }
}
