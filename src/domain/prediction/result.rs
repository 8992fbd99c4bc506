//! Result shapes returned by the model.
//!
//! # Optionality
//!
//! Mandatory scalar and text fields must be present or the response is
//! malformed. `dominantTraits` defaults to an empty list and `shadowProfile`
//! is optional; presentation relies on exactly this rule and nothing else.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Percentage;

use super::PredictionMode;

/// Either reading, discriminated by `mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PredictionResult {
    Archetype(ArchetypeResult),
    Measure(MeasureResult),
}

impl PredictionResult {
    pub fn mode(&self) -> PredictionMode {
        match self {
            PredictionResult::Archetype(_) => PredictionMode::Archetype,
            PredictionResult::Measure(_) => PredictionMode::Measure,
        }
    }

    /// Name shown as the headline: the archetype's or the real partner's.
    pub fn display_name(&self) -> &str {
        match self {
            PredictionResult::Archetype(a) => &a.name,
            PredictionResult::Measure(m) => &m.partner_name,
        }
    }

    /// Compatibility score or success probability.
    pub fn score(&self) -> Percentage {
        match self {
            PredictionResult::Archetype(a) => a.compatibility_score,
            PredictionResult::Measure(m) => m.success_probability,
        }
    }

    pub fn love_framework(&self) -> &LoveFramework {
        match self {
            PredictionResult::Archetype(a) => &a.love_framework,
            PredictionResult::Measure(m) => &m.love_framework,
        }
    }
}

impl From<ArchetypeResult> for PredictionResult {
    fn from(result: ArchetypeResult) -> Self {
        PredictionResult::Archetype(result)
    }
}

impl From<MeasureResult> for PredictionResult {
    fn from(result: MeasureResult) -> Self {
        PredictionResult::Measure(result)
    }
}

/// The generated ideal-partner archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeResult {
    pub name: String,
    pub gender: String,
    pub estimated_age: u32,
    pub occupation: String,
    pub compatibility_score: Percentage,
    pub reasoning: String,
    /// Physical description; also feeds the portrait prompt.
    pub physiological_match: String,
    pub psychological_match: String,
    #[serde(default)]
    pub dominant_traits: Vec<TraitScore>,
    pub love_framework: LoveFramework,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_profile: Option<ShadowProfile>,
    /// Never part of the model's JSON; attached after the image call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<GeneratedImage>,
}

/// The compatibility reading against a specific partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureResult {
    pub partner_name: String,
    pub relationship_status: RelationshipStatus,
    pub success_probability: Percentage,
    pub dynamic_analysis: String,
    pub potential_challenges: String,
    pub love_framework: LoveFramework,
}

/// Triangular-theory summary shared by both readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveFramework {
    pub intimacy_level: Percentage,
    pub passion_level: Percentage,
    pub commitment_level: Percentage,
    pub attachment_dynamic: String,
    pub synastry_report: String,
}

/// The "dark mirror" partner the user is drawn to under stress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowProfile {
    pub archetype: String,
    pub trigger_trait: String,
    pub description: String,
    pub lesson: String,
}

/// One axis of the archetype's trait radar.
///
/// Every member is optional in the response schema; a missing score reads as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitScore {
    #[serde(rename = "trait", default)]
    pub name: String,
    #[serde(default)]
    pub score: Percentage,
    #[serde(default)]
    pub description: String,
}

/// Category assigned to a measured relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipStatus {
    #[serde(rename = "Marriage Material")]
    MarriageMaterial,
    #[serde(rename = "Casual Connection")]
    CasualConnection,
    #[serde(rename = "Situationship")]
    Situationship,
    #[serde(rename = "Need-Based / Transactional")]
    NeedBased,
    #[serde(rename = "Karmic Lesson")]
    KarmicLesson,
}

impl RelationshipStatus {
    pub const ALL: [RelationshipStatus; 5] = [
        RelationshipStatus::MarriageMaterial,
        RelationshipStatus::CasualConnection,
        RelationshipStatus::Situationship,
        RelationshipStatus::NeedBased,
        RelationshipStatus::KarmicLesson,
    ];

    /// Wire label; also what the schema enumerates.
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipStatus::MarriageMaterial => "Marriage Material",
            RelationshipStatus::CasualConnection => "Casual Connection",
            RelationshipStatus::Situationship => "Situationship",
            RelationshipStatus::NeedBased => "Need-Based / Transactional",
            RelationshipStatus::KarmicLesson => "Karmic Lesson",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RelationshipStatus::MarriageMaterial => {
                "High long-term potential, shared values, stability."
            }
            RelationshipStatus::CasualConnection => "High passion, low commitment, fun but fleeting.",
            RelationshipStatus::Situationship => {
                "Ambiguous, undefined, emotional but lacks structure."
            }
            RelationshipStatus::NeedBased => "Based on filling a void rather than genuine synergy.",
            RelationshipStatus::KarmicLesson => "Intense, volatile, meant for growth but likely to end.",
        }
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inline portrait returned by the image model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64 payload exactly as the provider sent it.
    pub data: String,
}

impl GeneratedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.data.as_bytes())
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn love() -> serde_json::Value {
        json!({
            "intimacyLevel": 80,
            "passionLevel": 65,
            "commitmentLevel": 90,
            "attachmentDynamic": "Secure - Anxious",
            "synastryReport": "Grounded water meets restless fire."
        })
    }

    fn archetype_json() -> serde_json::Value {
        json!({
            "mode": "archetype",
            "name": "Julian",
            "gender": "Male",
            "estimatedAge": 32,
            "occupation": "Architect",
            "compatibilityScore": 87,
            "reasoning": "Balances your restlessness.",
            "physiologicalMatch": "Dark curls, warm hazel eyes.",
            "psychologicalMatch": "Patient and wry.",
            "dominantTraits": [
                {"trait": "Empathy", "score": 88.5, "description": "Reads the room."}
            ],
            "loveFramework": love(),
            "shadowProfile": {
                "archetype": "The Volatile Muse",
                "triggerTrait": "Repressed anger",
                "description": "Thrilling and draining.",
                "lesson": "Calm is not boredom."
            }
        })
    }

    #[test]
    fn tagged_union_dispatches_on_mode() {
        let result: PredictionResult = serde_json::from_value(archetype_json()).unwrap();
        match result {
            PredictionResult::Archetype(a) => {
                assert_eq!(a.name, "Julian");
                assert_eq!(a.compatibility_score.value(), 87);
                assert_eq!(a.dominant_traits[0].name, "Empathy");
                assert_eq!(a.dominant_traits[0].score.value(), 89);
                assert!(a.shadow_profile.is_some());
                assert!(a.image.is_none());
            }
            other => panic!("expected archetype, got {:?}", other),
        }
    }

    #[test]
    fn missing_shadow_and_traits_are_tolerated() {
        let mut value = archetype_json();
        let obj = value.as_object_mut().unwrap();
        obj.remove("shadowProfile");
        obj.remove("dominantTraits");
        let result: ArchetypeResult = serde_json::from_value(value).unwrap();
        assert!(result.shadow_profile.is_none());
        assert!(result.dominant_traits.is_empty());
    }

    #[test]
    fn partial_trait_items_are_tolerated() {
        let mut value = archetype_json();
        value["dominantTraits"] = json!([
            {"trait": "Curiosity", "description": "Always asking why."},
            {"score": 40}
        ]);
        let result: ArchetypeResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.dominant_traits.len(), 2);
        assert_eq!(result.dominant_traits[0].name, "Curiosity");
        assert_eq!(result.dominant_traits[0].score, Percentage::ZERO);
        assert_eq!(result.dominant_traits[1].name, "");
        assert_eq!(result.dominant_traits[1].score.value(), 40);
        assert_eq!(result.dominant_traits[1].description, "");
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let mut value = archetype_json();
        value.as_object_mut().unwrap().remove("occupation");
        assert!(serde_json::from_value::<ArchetypeResult>(value).is_err());
    }

    #[test]
    fn measure_result_parses_status_label() {
        let value = json!({
            "mode": "measure",
            "partnerName": "Sam",
            "relationshipStatus": "Karmic Lesson",
            "successProbability": 41,
            "dynamicAnalysis": "Magnetic but combustible.",
            "potentialChallenges": "Different rhythms.",
            "loveFramework": love()
        });
        let result: PredictionResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.mode(), PredictionMode::Measure);
        assert_eq!(result.display_name(), "Sam");
        match result {
            PredictionResult::Measure(m) => {
                assert_eq!(m.relationship_status, RelationshipStatus::KarmicLesson)
            }
            other => panic!("expected measure, got {:?}", other),
        }
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        let value = json!("Soulmates");
        assert!(serde_json::from_value::<RelationshipStatus>(value).is_err());
    }

    #[test]
    fn status_serializes_to_its_label() {
        for status in RelationshipStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.label()));
        }
    }

    #[test]
    fn generated_image_decodes_payload() {
        let image = GeneratedImage::new("image/png", "aGVsbG8=");
        assert_eq!(image.decode().unwrap(), b"hello");
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn serialized_archetype_carries_mode_discriminator() {
        let result: PredictionResult = serde_json::from_value(archetype_json()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["mode"], "archetype");
        assert!(value.get("image").is_none());
    }
}
