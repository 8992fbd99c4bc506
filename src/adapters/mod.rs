//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generative model clients (Gemini, mock)

pub mod ai;

pub use ai::{GeminiConfig, GeminiModel, MockGenerativeModel};
