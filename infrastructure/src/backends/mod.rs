//! HTTP backends
//!
//! Each provider is its own [`Backend`](eskai_application::Backend) type.
//! OpenAI and Groq share the chat-completions wire format; Gemini speaks
//! `generateContent`. The [`BackendRegistry`] turns configured provider
//! names into a [`BackendPool`](eskai_application::BackendPool).

mod chat_completions;
mod gemini;
mod groq;
mod openai;
mod registry;

pub use gemini::GeminiBackend;
pub use groq::GroqBackend;
pub use openai::OpenAiBackend;
pub use registry::{BackendConstructor, BackendRegistry, RegistryError};

use std::time::Duration;

use eskai_application::BackendError;

/// Resolved connection settings of one backend
#[derive(Clone, PartialEq)]
pub struct BackendSettings {
    /// Registry name
    pub name: String,
    pub model: String,
    /// Without trailing slash
    pub base_url: String,
    pub api_key: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub temperature: f32,
}

impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Longest error body kept in [`BackendError::Http`]
const ERROR_BODY_LIMIT: usize = 500;

fn http_client(settings: &BackendSettings) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(settings.timeout)
        .build()
        .map_err(|e| BackendError::NotConfigured(format!("{}: {}", settings.name, e)))
}

fn request_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::RequestFailed(e.to_string())
    }
}

/// Read a response body, turning non-success statuses into [`BackendError::Http`].
async fn success_body(response: reqwest::Response) -> Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await.map_err(request_error)?;
    if !status.is_success() {
        return Err(BackendError::Http {
            status: status.as_u16(),
            message: eskai_domain::core::string::truncate_bytes(body.trim(), ERROR_BODY_LIMIT)
                .to_string(),
        });
    }
    Ok(body)
}
