//! Gemini backend (`models/{model}:generateContent`)

use async_trait::async_trait;
use eskai_application::{Backend, BackendError, GenerateOptions};
use eskai_domain::BackendProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BackendSettings, http_client, request_error, success_body};

// Gemini API request/response structures

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

pub struct GeminiBackend {
    profile: BackendProfile,
    http: reqwest::Client,
    settings: BackendSettings,
}

impl GeminiBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        Ok(Self {
            profile: BackendProfile::new(&settings.name, &settings.model, settings.temperature),
            http: http_client(&settings)?,
            settings,
        })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        )
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    fn profile(&self) -> &BackendProfile {
        &self.profile
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, BackendError> {
        let body = build_request(prompt, options, self.settings.temperature);
        debug!(backend = %self.settings.name, model = %self.settings.model, "Sending generateContent");

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        parse_response(&success_body(response).await?)
    }
}

fn build_request<'a>(
    prompt: &'a str,
    options: &'a GenerateOptions,
    default_temperature: f32,
) -> GeminiRequest<'a> {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts: vec![GeminiPart { text: prompt }],
        }],
        system_instruction: options
            .system
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|text| GeminiSystemInstruction {
                parts: vec![GeminiPart { text }],
            }),
        generation_config: GeminiGenerationConfig {
            temperature: options.temperature.unwrap_or(default_temperature),
            max_output_tokens: options.max_tokens,
        },
    }
}

fn parse_response(body: &str) -> Result<String, BackendError> {
    let parsed: GeminiResponse =
        serde_json::from_str(body).map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

    if let Some(error) = parsed.error {
        return Err(BackendError::InvalidResponse(format!(
            "Gemini API error: {}",
            error.message
        )));
    }

    let text: String = parsed
        .candidates
        .and_then(|c| c.into_iter().next())
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .ok_or_else(|| BackendError::InvalidResponse("No content in response".to_string()))?;
    Ok(text)
}
