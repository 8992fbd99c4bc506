//! Generative Model Adapters.
//!
//! Implementations of the GenerativeModel port.
//!
//! ## Available Adapters
//!
//! - `GeminiModel` - Google Gemini REST API (structured JSON and image generation)
//! - `MockGenerativeModel` - Configurable mock for testing

mod gemini_model;
mod mock_model;

pub use gemini_model::{
    GeminiConfig, GeminiModel, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL,
    DEFAULT_THINKING_BUDGET,
};
pub use mock_model::MockGenerativeModel;
