//! User-facing notice shown after a failed prediction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failed request, chosen from the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorNotice {
    QuotaExceeded,
    RateLimited,
    SafetyBlocked,
    Unknown { detail: String },
}

impl ErrorNotice {
    /// Classifies a failure message. Checks run in order: quota, `429`,
    /// safety, then anything else.
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("quota") {
            ErrorNotice::QuotaExceeded
        } else if lowered.contains("429") {
            ErrorNotice::RateLimited
        } else if lowered.contains("safety") {
            ErrorNotice::SafetyBlocked
        } else {
            ErrorNotice::Unknown {
                detail: message.trim().to_string(),
            }
        }
    }

    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::classify(&err.to_string())
    }

    pub fn message(&self) -> String {
        match self {
            ErrorNotice::QuotaExceeded => "Cosmic Energy Depleted: API quota exceeded.".to_string(),
            ErrorNotice::RateLimited => "The stars are aligning too quickly. Please pause.".to_string(),
            ErrorNotice::SafetyBlocked => {
                "The oracle withheld the vision due to safety guidelines.".to_string()
            }
            ErrorNotice::Unknown { detail } if detail.is_empty() => {
                "Cosmic disturbance: Unknown Error".to_string()
            }
            ErrorNotice::Unknown { detail } => format!("Cosmic disturbance: {}", detail),
        }
    }
}

impl fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
