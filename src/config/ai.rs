//! Generative model configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Model used for the structured text readings
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for the archetype portrait
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// REST base URL, up to and including the API version
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Thinking tokens allowed for structured calls
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,
}

impl AiConfig {
    /// Check if a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }

        if self.text_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName("TEXT_MODEL"));
        }
        if self.image_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName("IMAGE_MODEL"));
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
            base_url: default_base_url(),
            thinking_budget: default_thinking_budget(),
        }
    }
}

fn default_text_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_thinking_budget() -> u32 {
    32768
}
