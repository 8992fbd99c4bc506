//! Response schemas handed to the provider alongside each text prompt.
//!
//! Gemini's schema dialect: upper-case type names, `required` lists per object.

use serde_json::{json, Value};

use super::RelationshipStatus;

fn love_framework_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "intimacyLevel": { "type": "INTEGER", "description": "Score 0-100 based on Sternberg's Triangular Theory." },
            "passionLevel": { "type": "INTEGER", "description": "Score 0-100 based on Sternberg's Triangular Theory." },
            "commitmentLevel": { "type": "INTEGER", "description": "Score 0-100 based on Sternberg's Triangular Theory." },
            "attachmentDynamic": { "type": "STRING", "description": "The psychosocial attachment pairing (e.g. Secure-Anxious)." },
            "synastryReport": { "type": "STRING", "description": "Analysis of the dataset correlation." }
        },
        "required": ["intimacyLevel", "passionLevel", "commitmentLevel", "attachmentDynamic", "synastryReport"]
    })
}

fn shadow_profile_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "archetype": { "type": "STRING", "description": "Name of the shadow archetype (e.g. 'The Volatile Muse')." },
            "triggerTrait": { "type": "STRING", "description": "The trait in the user that attracts this shadow." },
            "description": { "type": "STRING", "description": "Description of the dark-mirror relationship." },
            "lesson": { "type": "STRING", "description": "What this shadow partner teaches." }
        },
        "required": ["archetype", "triggerTrait", "description", "lesson"]
    })
}

/// Schema for the ideal-partner archetype reading.
pub fn archetype_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "mode": { "type": "STRING", "enum": ["archetype"] },
            "name": { "type": "STRING" },
            "gender": { "type": "STRING", "description": "The gender of the predicted partner." },
            "estimatedAge": { "type": "INTEGER" },
            "occupation": { "type": "STRING" },
            "compatibilityScore": { "type": "INTEGER" },
            "reasoning": { "type": "STRING" },
            "physiologicalMatch": { "type": "STRING", "description": "Detailed physical description of the partner (hair, eyes, style)." },
            "psychologicalMatch": { "type": "STRING" },
            "dominantTraits": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "trait": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "description": { "type": "STRING" }
                    }
                }
            },
            "loveFramework": love_framework_schema(),
            "shadowProfile": shadow_profile_schema()
        },
        "required": [
            "mode", "name", "gender", "estimatedAge", "occupation", "compatibilityScore",
            "reasoning", "physiologicalMatch", "psychologicalMatch", "dominantTraits",
            "loveFramework", "shadowProfile"
        ]
    })
}

/// Schema for the specific-partner compatibility reading.
pub fn measure_response_schema() -> Value {
    let statuses: Vec<&str> = RelationshipStatus::ALL.iter().map(|s| s.label()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "mode": { "type": "STRING", "enum": ["measure"] },
            "partnerName": { "type": "STRING" },
            "relationshipStatus": {
                "type": "STRING",
                "enum": statuses,
                "description": "The predicted category of the relationship based on the inputs."
            },
            "successProbability": { "type": "INTEGER", "description": "0-100 chance of long-term success." },
            "dynamicAnalysis": { "type": "STRING", "description": "Detailed psychological analysis of the dynamic." },
            "potentialChallenges": { "type": "STRING", "description": "Key friction points." },
            "loveFramework": love_framework_schema()
        },
        "required": [
            "mode", "partnerName", "relationshipStatus", "successProbability",
            "dynamicAnalysis", "potentialChallenges", "loveFramework"
        ]
    })
}
