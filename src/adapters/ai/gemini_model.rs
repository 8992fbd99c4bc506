//! Gemini Model - Implementation of GenerativeModel for Google's Gemini REST API.
//!
//! Both capabilities go through `models/{model}:generateContent`:
//!
//! - structured text sets `responseMimeType: application/json`, the caller's
//!   `responseSchema` and a thinking budget
//! - images ask the image model for a square picture and read the first
//!   `inlineData` part
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(Secret::new(api_key))
//!     .with_text_model("gemini-3-pro-preview")
//!     .with_image_model("gemini-2.5-flash-image");
//!
//! let model = GeminiModel::new(config)?;
//! ```
//!
//! Requests are single-shot: no retry and no client-side timeout.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::prediction::GeneratedImage;
use crate::ports::{GenerativeModel, ImageRequest, ModelError, ModelInfo, StructuredRequest};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_THINKING_BUDGET: u32 = 32768;

/// Configuration for the Gemini adapter.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub text_model: String,
    pub image_model: String,
    pub base_url: String,
    /// Thinking tokens for structured calls; `None` leaves the model default.
    pub thinking_budget: Option<u32>,
}

impl GeminiConfig {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_thinking_budget(mut self, budget: Option<u32>) -> Self {
        self.thinking_budget = budget;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini REST adapter.
pub struct GeminiModel {
    config: GeminiConfig,
    client: Client,
}

impl GeminiModel {
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ModelError::Other(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn send(&self, model: &str, body: &GenerateContentRequest) -> Result<GenerateContentResponse, ModelError> {
        let response = self
            .client
            .post(self.generate_url(model))
            .header("x-goog-api-key", self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ModelError::Network(format!("Connection failed: {}", e))
                } else {
                    ModelError::Network(e.to_string())
                }
            })?;

        let response = handle_response_status(response).await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(format!("Failed to parse response: {}", e)))?;

        parsed.check_blocked()?;
        Ok(parsed)
    }
}

/// Maps a non-success status to a `ModelError`.
async fn handle_response_status(response: Response) -> Result<Response, ModelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), &body))
}

fn status_error(status: u16, body: &str) -> ModelError {
    let (message, reason) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status.unwrap_or_default()),
        Err(_) => (body.trim().to_string(), String::new()),
    };

    match status {
        401 => ModelError::AuthenticationFailed,
        429 if message.to_lowercase().contains("quota") => ModelError::quota(message),
        429 => ModelError::rate_limited(message),
        _ if reason == "RESOURCE_EXHAUSTED" => ModelError::quota(message),
        _ => ModelError::http(status, message),
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate_structured(&self, request: StructuredRequest) -> Result<String, ModelError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user_text(request.prompt)],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(request.response_schema),
                thinking_config: self
                    .config
                    .thinking_budget
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
                image_config: None,
            },
        };

        tracing::debug!(model = %self.config.text_model, "sending structured generation request");
        let response = self.send(&self.config.text_model, &body).await?;
        Ok(response.text())
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<Option<GeneratedImage>, ModelError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user_text(request.prompt)],
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                thinking_config: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: request.aspect_ratio,
                }),
            },
        };

        tracing::debug!(model = %self.config.image_model, "sending image generation request");
        let response = self.send(&self.config.image_model, &body).await?;
        Ok(response.first_inline_image())
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new("gemini", &self.config.text_model, &self.config.image_model)
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

impl Content {
    fn user_text(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![TextPart { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Safety blocks arrive as a 200 with a block reason instead of content.
    fn check_blocked(&self) -> Result<(), ModelError> {
        if let Some(reason) = self.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_ref()) {
            return Err(ModelError::safety(reason.clone()));
        }
        if let Some(candidate) = self.candidates.first() {
            if candidate.finish_reason.as_deref() == Some("SAFETY") {
                return Err(ModelError::safety("SAFETY"));
            }
        }
        Ok(())
    }

    /// Concatenated text of the first candidate, skipping thought parts.
    fn text(&self) -> String {
        self.first_parts()
            .iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    fn first_inline_image(&self) -> Option<GeneratedImage> {
        self.first_parts()
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| GeneratedImage::new(d.mime_type.clone(), d.data.clone()))
    }

    fn first_parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> GeminiConfig {
        GeminiConfig::new(Secret::new("test-key".to_string()))
    }

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = config();
        assert_eq!(config.text_model, "gemini-3-pro-preview");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.thinking_budget, Some(32768));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_debug_hides_key() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("test-key"));
    }

    #[test]
    fn url_joins_base_and_model() {
        let model = GeminiModel::new(config().with_base_url("http://localhost:9999/v1beta/")).unwrap();
        assert_eq!(
            model.generate_url("gemini-3-pro-preview"),
            "http://localhost:9999/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn structured_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content::user_text("hello".to_string())],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(json!({"type": "OBJECT"})),
                thinking_config: Some(ThinkingConfig { thinking_budget: 32768 }),
                image_config: None,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["thinkingConfig"]["thinkingBudget"], 32768);
        assert!(value["generationConfig"].get("imageConfig").is_none());
    }

    #[test]
    fn image_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content::user_text("portrait".to_string())],
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                thinking_config: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                }),
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["generationConfig"]["imageConfig"]["aspectRatio"], "1:1");
        assert!(value["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn text_concatenates_parts_and_skips_thoughts() {
        let response = parse(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "planning...", "thought": true},
                    {"text": "{\"a\":"},
                    {"text": "1}"}
                ]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(response.text(), "{\"a\":1}");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        assert_eq!(parse(json!({})).text(), "");
    }

    #[test]
    fn inline_image_is_extracted() {
        let response = parse(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Here is your portrait"},
                    {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                ]}
            }]
        }));
        let image = response.first_inline_image().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.decode().unwrap(), b"hello");
    }

    #[test]
    fn text_only_image_response_has_no_image() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "no picture today"}]}}]
        }));
        assert!(response.first_inline_image().is_none());
    }

    #[test]
    fn prompt_block_is_a_safety_error() {
        let response = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        let err = response.check_blocked().unwrap_err();
        assert!(matches!(err, ModelError::SafetyBlocked { .. }));
        assert!(err.to_string().contains("safety"));
    }

    #[test]
    fn safety_finish_reason_is_a_safety_error() {
        let response = parse(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        assert!(response.check_blocked().is_err());
    }

    #[test]
    fn status_429_with_quota_text_is_quota() {
        let body = r#"{"error":{"code":429,"message":"You exceeded your current quota","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(status_error(429, body), ModelError::QuotaExceeded { .. }));
    }

    #[test]
    fn status_429_without_quota_text_is_rate_limited() {
        let body = r#"{"error":{"code":429,"message":"Too many requests","status":"UNAVAILABLE"}}"#;
        let err = status_error(429, body);
        assert!(matches!(err, ModelError::RateLimited { .. }));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn status_401_is_authentication() {
        assert_eq!(status_error(401, ""), ModelError::AuthenticationFailed);
    }

    #[test]
    fn other_statuses_keep_code_and_message() {
        let body = r#"{"error":{"code":500,"message":"internal","status":"INTERNAL"}}"#;
        assert_eq!(status_error(500, body).to_string(), "HTTP 500: internal");
        assert_eq!(status_error(502, "bad gateway").to_string(), "HTTP 502: bad gateway");
    }
}
