//! PredictionService - PredictionGateway on top of a GenerativeModel.
//!
//! Builds the prompt and schema for each reading, parses the model's JSON
//! into the result type, and for archetypes attempts a portrait. A failed or
//! empty portrait never fails the reading.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::prediction::{
    archetype_prompt, archetype_response_schema, measure_prompt, measure_response_schema,
    portrait_prompt, ArchetypeResult, MeasureResult,
};
use crate::domain::profile::{SpecificPartnerDetails, UserProfile};
use crate::ports::{GatewayError, GenerativeModel, ImageRequest, PredictionGateway, StructuredRequest};

/// Gateway backed by a generative model.
pub struct PredictionService {
    model: Arc<dyn GenerativeModel>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    async fn generate<T: DeserializeOwned>(&self, request: StructuredRequest) -> Result<T, GatewayError> {
        let text = self.model.generate_structured(request).await?;
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        serde_json::from_str(&text).map_err(|e| GatewayError::malformed(e.to_string()))
    }

    async fn attach_portrait(&self, archetype: &mut ArchetypeResult) {
        let request = ImageRequest::square(portrait_prompt(archetype));
        match self.model.generate_image(request).await {
            Ok(Some(image)) => archetype.image = Some(image),
            Ok(None) => {
                tracing::debug!(name = %archetype.name, "image model returned no inline data");
            }
            Err(err) => {
                tracing::warn!(error = %err, "portrait generation failed, continuing with text only");
            }
        }
    }
}

#[async_trait]
impl PredictionGateway for PredictionService {
    async fn predict_archetype(&self, user: &UserProfile) -> Result<ArchetypeResult, GatewayError> {
        let request = StructuredRequest::new(archetype_prompt(user), archetype_response_schema());

        let mut archetype: ArchetypeResult = self.generate(request).await.map_err(|err| {
            tracing::error!(error = %err, "archetype prediction failed");
            err
        })?;

        self.attach_portrait(&mut archetype).await;

        tracing::info!(
            score = archetype.compatibility_score.value(),
            has_portrait = archetype.image.is_some(),
            "archetype prediction complete"
        );
        Ok(archetype)
    }

    async fn analyze_compatibility(
        &self,
        user: &UserProfile,
        partner: &SpecificPartnerDetails,
    ) -> Result<MeasureResult, GatewayError> {
        let request = StructuredRequest::new(measure_prompt(user, partner), measure_response_schema());

        let analysis: MeasureResult = self.generate(request).await.map_err(|err| {
            tracing::error!(error = %err, "compatibility analysis failed");
            err
        })?;

        tracing::info!(
            score = analysis.success_probability.value(),
            status = %analysis.relationship_status,
            "compatibility analysis complete"
        );
        Ok(analysis)
    }
}
