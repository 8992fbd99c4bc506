//! Details of the real partner scored in measure mode.

use serde::{Deserialize, Serialize};

/// The specific person the user wants a compatibility reading for.
///
/// Gender is free text here; age carries no positivity rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificPartnerDetails {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub religion: String,
}

impl Default for SpecificPartnerDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 25,
            gender: "Male".to_string(),
            religion: String::new(),
        }
    }
}

impl SpecificPartnerDetails {
    /// Line-per-field block embedded in the measure prompt.
    pub fn to_prompt_block(&self) -> String {
        format!(
            "Name: {}\nAge: {}\nGender: {}\nReligion/Belief System: {}",
            self.name, self.age, self.gender, self.religion
        )
    }
}
