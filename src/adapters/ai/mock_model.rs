//! Mock Generative Model for testing.
//!
//! Provides a configurable implementation of the GenerativeModel port so
//! gateway and handler tests run without network access.
//!
//! # Features
//!
//! - Separate queues for structured and image responses
//! - Error injection on either queue
//! - Simulated latency
//! - Call recording for verification
//!
//! # Example
//!
//! ```ignore
//! let model = MockGenerativeModel::new()
//!     .with_json(json!({"name": "Elara", ...}))
//!     .with_image_error(ModelError::safety("SAFETY"));
//!
//! let text = model.generate_structured(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::prediction::GeneratedImage;
use crate::ports::{GenerativeModel, ImageRequest, ModelError, ModelInfo, StructuredRequest};

type TextReply = Result<String, ModelError>;
type ImageReply = Result<Option<GeneratedImage>, ModelError>;

/// Mock generative model.
///
/// When a queue runs dry, structured calls fail with `ModelError::Other` and
/// image calls return `Ok(None)`.
#[derive(Debug, Clone)]
pub struct MockGenerativeModel {
    text_replies: Arc<Mutex<VecDeque<TextReply>>>,
    image_replies: Arc<Mutex<VecDeque<ImageReply>>>,
    structured_calls: Arc<Mutex<Vec<StructuredRequest>>>,
    image_calls: Arc<Mutex<Vec<ImageRequest>>>,
    info: ModelInfo,
    delay: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockGenerativeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerativeModel {
    pub fn new() -> Self {
        Self {
            text_replies: Arc::new(Mutex::new(VecDeque::new())),
            image_replies: Arc::new(Mutex::new(VecDeque::new())),
            structured_calls: Arc::new(Mutex::new(Vec::new())),
            image_calls: Arc::new(Mutex::new(Vec::new())),
            info: ModelInfo::new("mock", "mock-text-1", "mock-image-1"),
            delay: Duration::ZERO,
        }
    }

    /// Queues raw text for the next structured call.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        lock(&self.text_replies).push_back(Ok(text.into()));
        self
    }

    /// Queues a JSON document for the next structured call.
    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_text(value.to_string())
    }

    pub fn with_text_error(self, error: ModelError) -> Self {
        lock(&self.text_replies).push_back(Err(error));
        self
    }

    pub fn with_image(self, image: GeneratedImage) -> Self {
        lock(&self.image_replies).push_back(Ok(Some(image)));
        self
    }

    /// Queues an image reply that carries no picture.
    pub fn with_no_image(self) -> Self {
        lock(&self.image_replies).push_back(Ok(None));
        self
    }

    pub fn with_image_error(self, error: ModelError) -> Self {
        lock(&self.image_replies).push_back(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn structured_calls(&self) -> Vec<StructuredRequest> {
        lock(&self.structured_calls).clone()
    }

    pub fn image_calls(&self) -> Vec<ImageRequest> {
        lock(&self.image_calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.structured_calls).len() + lock(&self.image_calls).len()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl GenerativeModel for MockGenerativeModel {
    async fn generate_structured(&self, request: StructuredRequest) -> Result<String, ModelError> {
        lock(&self.structured_calls).push(request);
        self.pause().await;
        let reply = lock(&self.text_replies).pop_front();
        reply.unwrap_or_else(|| Err(ModelError::Other("no mock response queued".to_string())))
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<Option<GeneratedImage>, ModelError> {
        lock(&self.image_calls).push(request);
        self.pause().await;
        let reply = lock(&self.image_replies).pop_front();
        reply.unwrap_or(Ok(None))
    }

    fn model_info(&self) -> ModelInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structured() -> StructuredRequest {
        StructuredRequest::new("prompt", json!({"type": "OBJECT"}))
    }

    #[tokio::test]
    async fn returns_text_in_order() {
        let model = MockGenerativeModel::new().with_text("first").with_text("second");

        assert_eq!(model.generate_structured(structured()).await.unwrap(), "first");
        assert_eq!(model.generate_structured(structured()).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn exhausted_text_queue_is_an_error() {
        let model = MockGenerativeModel::new();
        assert!(model.generate_structured(structured()).await.is_err());
    }

    #[tokio::test]
    async fn injected_errors_are_returned() {
        let model = MockGenerativeModel::new().with_text_error(ModelError::rate_limited("busy"));
        let err = model.generate_structured(structured()).await.unwrap_err();
        assert!(matches!(err, ModelError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn image_queue_defaults_to_none() {
        let model = MockGenerativeModel::new();
        assert_eq!(model.generate_image(ImageRequest::square("p")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn records_calls() {
        let model = MockGenerativeModel::new()
            .with_text("{}")
            .with_image(GeneratedImage::new("image/png", "aGk="));

        model.generate_structured(structured()).await.unwrap();
        model.generate_image(ImageRequest::square("a portrait")).await.unwrap();

        assert_eq!(model.call_count(), 2);
        assert_eq!(model.structured_calls()[0].prompt, "prompt");
        assert_eq!(model.image_calls()[0].prompt, "a portrait");
    }

    #[tokio::test]
    async fn clones_share_queues() {
        let model = MockGenerativeModel::new();
        let handle = model.clone().with_text("shared");
        assert_eq!(model.generate_structured(structured()).await.unwrap(), "shared");
        assert_eq!(handle.call_count(), 1);
    }

    #[test]
    fn reports_mock_info() {
        assert_eq!(MockGenerativeModel::new().model_info().provider, "mock");
    }
}
