//! Generative Model Port - Interface to a hosted multimodal model.
//!
//! Two capabilities are needed: text generation constrained by a JSON
//! response schema, and single-image generation from a text prompt. The
//! gateway layer builds prompts and parses results; implementations only
//! move bytes to and from the provider.
//!
//! # Error text
//!
//! The user-facing notice is chosen by matching `quota`, `429` and `safety`
//! in an error's display text, so variants for those conditions keep the
//! marker in their message.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::prediction::GeneratedImage;

/// Port for a hosted generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate JSON text conforming to `request.response_schema`.
    ///
    /// Returns the raw text of the first candidate; an empty string means the
    /// provider answered without content.
    async fn generate_structured(&self, request: StructuredRequest) -> Result<String, ModelError>;

    /// Generate one image. `Ok(None)` when the provider answered without
    /// inline image data.
    async fn generate_image(&self, request: ImageRequest) -> Result<Option<GeneratedImage>, ModelError>;

    /// Provider and model identifiers.
    fn model_info(&self) -> ModelInfo;
}

/// Text generation constrained to a JSON schema.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub prompt: String,
    /// Schema in the provider's upper-case type dialect.
    pub response_schema: serde_json::Value,
}

impl StructuredRequest {
    pub fn new(prompt: impl Into<String>, response_schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema,
        }
    }
}

/// Image generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: String,
}

impl ImageRequest {
    /// A square image.
    pub fn square(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: "1:1".to_string(),
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub provider: String,
    pub text_model: String,
    pub image_model: String,
}

impl ModelInfo {
    pub fn new(
        provider: impl Into<String>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            text_model: text_model.into(),
            image_model: image_model.into(),
        }
    }
}

/// Generative model errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Billing or usage quota exhausted.
    #[error("quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// Too many requests (HTTP 429).
    #[error("429 rate limited: {message}")]
    RateLimited { message: String },

    /// Prompt or output blocked by provider safety filters.
    #[error("blocked by safety filters: {reason}")]
    SafetyBlocked { reason: String },

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Provider body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Other(String),
}

impl ModelError {
    pub fn quota(message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn safety(reason: impl Into<String>) -> Self {
        Self::SafetyBlocked {
            reason: reason.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_variants_keep_their_markers() {
        assert!(ModelError::quota("daily limit").to_string().contains("quota"));
        assert!(ModelError::rate_limited("slow down").to_string().contains("429"));
        assert!(ModelError::safety("SAFETY").to_string().contains("safety"));
    }

    #[test]
    fn other_displays_verbatim() {
        assert_eq!(ModelError::Other("boom".to_string()).to_string(), "boom");
    }

    #[test]
    fn square_image_request() {
        let request = ImageRequest::square("a portrait");
        assert_eq!(request.aspect_ratio, "1:1");
    }
}
