//! OpenAI chat-completions wire format, shared by OpenAI and Groq

use eskai_application::{BackendError, GenerateOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BackendSettings, http_client, request_error, success_body};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint
pub(super) struct ChatCompletionsClient {
    http: reqwest::Client,
    settings: BackendSettings,
}

impl ChatCompletionsClient {
    pub(super) fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        Ok(Self {
            http: http_client(&settings)?,
            settings,
        })
    }

    pub(super) fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }

    pub(super) async fn complete(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, BackendError> {
        let body = build_request(&self.settings, prompt, options);
        debug!(backend = %self.settings.name, model = %self.settings.model, "Sending chat completion");

        let response = self
            .http
            .post(self.url())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        parse_response(&success_body(response).await?)
    }
}

fn build_request<'a>(
    settings: &'a BackendSettings,
    prompt: &'a str,
    options: &'a GenerateOptions,
) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = options.system.as_deref() {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });

    ChatRequest {
        model: &settings.model,
        messages,
        temperature: options.temperature.unwrap_or(settings.temperature),
        max_tokens: options.max_tokens,
    }
}

fn parse_response(body: &str) -> Result<String, BackendError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| BackendError::InvalidResponse("no choices in response".to_string()))
}
