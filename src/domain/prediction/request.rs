//! Snapshot of the inputs sent for one reading.

use serde::{Deserialize, Serialize};

use super::PredictionMode;
use crate::domain::profile::{SpecificPartnerDetails, UserProfile};

/// What the gateway is asked to compute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PredictionRequest {
    Archetype {
        user: UserProfile,
    },
    Measure {
        user: UserProfile,
        partner: SpecificPartnerDetails,
    },
}

impl PredictionRequest {
    pub fn mode(&self) -> PredictionMode {
        match self {
            PredictionRequest::Archetype { .. } => PredictionMode::Archetype,
            PredictionRequest::Measure { .. } => PredictionMode::Measure,
        }
    }

    pub fn user(&self) -> &UserProfile {
        match self {
            PredictionRequest::Archetype { user } | PredictionRequest::Measure { user, .. } => user,
        }
    }

    pub fn partner(&self) -> Option<&SpecificPartnerDetails> {
        match self {
            PredictionRequest::Archetype { .. } => None,
            PredictionRequest::Measure { partner, .. } => Some(partner),
        }
    }
}
