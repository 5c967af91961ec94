//! Groq backend (OpenAI-compatible endpoint)

use async_trait::async_trait;
use eskai_application::{Backend, BackendError, GenerateOptions};
use eskai_domain::BackendProfile;

use super::BackendSettings;
use super::chat_completions::ChatCompletionsClient;

pub struct GroqBackend {
    profile: BackendProfile,
    client: ChatCompletionsClient,
}

impl GroqBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let profile = BackendProfile::new(&settings.name, &settings.model, settings.temperature);
        Ok(Self {
            profile,
            client: ChatCompletionsClient::new(settings)?,
        })
    }

    pub fn settings(&self) -> &BackendSettings {
        self.client.settings()
    }
}

#[async_trait]
impl Backend for GroqBackend {
    fn profile(&self) -> &BackendProfile {
        &self.profile
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, BackendError> {
        self.client.complete(prompt, options).await
    }
}
