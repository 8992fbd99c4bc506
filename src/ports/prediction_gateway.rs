//! Prediction Gateway Port - The two readings the front-end can request.

use async_trait::async_trait;

use super::ModelError;
use crate::domain::foundation::ErrorCode;
use crate::domain::prediction::{ArchetypeResult, MeasureResult, PredictionRequest, PredictionResult};
use crate::domain::profile::{SpecificPartnerDetails, UserProfile};

/// Port for requesting readings.
#[async_trait]
pub trait PredictionGateway: Send + Sync {
    /// Generate an ideal-partner archetype, with a portrait when the image
    /// step succeeds.
    async fn predict_archetype(&self, user: &UserProfile) -> Result<ArchetypeResult, GatewayError>;

    /// Score compatibility with a named partner.
    async fn analyze_compatibility(
        &self,
        user: &UserProfile,
        partner: &SpecificPartnerDetails,
    ) -> Result<MeasureResult, GatewayError>;

    /// Dispatch on the request's mode.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, GatewayError> {
        match request {
            PredictionRequest::Archetype { user } => Ok(self.predict_archetype(user).await?.into()),
            PredictionRequest::Measure { user, partner } => {
                Ok(self.analyze_compatibility(user, partner).await?.into())
            }
        }
    }
}

/// Gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The model answered with no text.
    #[error("No response received.")]
    EmptyResponse,

    /// The model's text did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Model(ModelError::QuotaExceeded { .. }) => ErrorCode::QuotaExceeded,
            GatewayError::Model(ModelError::RateLimited { .. }) => ErrorCode::RateLimited,
            GatewayError::Model(ModelError::SafetyBlocked { .. }) => ErrorCode::ContentBlocked,
            GatewayError::Model(_) => ErrorCode::AIProviderError,
            GatewayError::EmptyResponse | GatewayError::MalformedResponse(_) => ErrorCode::MalformedResponse,
        }
    }
}
