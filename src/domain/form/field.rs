//! Form fields and the pure per-field validity rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::prediction::PredictionMode;
use crate::domain::profile::{SpecificPartnerDetails, UserProfile};

/// Every input the form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Age,
    Gender,
    Zodiac,
    EyeColor,
    FavoriteColor,
    StressReaction,
    GenderPreference,
    PartnerTraitsPreference,
    AdditionalDetails,
    PartnerName,
    PartnerAge,
    PartnerGender,
    PartnerReligion,
}

/// Display state of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Nothing to report yet.
    Neutral,
    /// Touched and failing its rule.
    Invalid,
    /// Passing its rule and either touched or filled in.
    Valid,
}

impl FormField {
    /// Key used in the serialized profile.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Age => "age",
            FormField::Gender => "gender",
            FormField::Zodiac => "zodiac",
            FormField::EyeColor => "eyeColor",
            FormField::FavoriteColor => "favoriteColor",
            FormField::StressReaction => "stressReaction",
            FormField::GenderPreference => "genderPreference",
            FormField::PartnerTraitsPreference => "partnerTraitsPreference",
            FormField::AdditionalDetails => "additionalDetails",
            FormField::PartnerName => "partnerName",
            FormField::PartnerAge => "partnerAge",
            FormField::PartnerGender => "partnerGender",
            FormField::PartnerReligion => "partnerReligion",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Age => "Age",
            FormField::Gender => "Gender",
            FormField::Zodiac => "Zodiac Sign",
            FormField::EyeColor => "Eye Color",
            FormField::FavoriteColor => "Favorite Color",
            FormField::StressReaction => "Stress Reaction",
            FormField::GenderPreference => "Seeking",
            FormField::PartnerTraitsPreference => "Key Concepts & Traits",
            FormField::AdditionalDetails => "About You",
            FormField::PartnerName => "Partner Name",
            FormField::PartnerAge => "Partner Age",
            FormField::PartnerGender => "Partner Gender",
            FormField::PartnerReligion => "Religion / Belief",
        }
    }

    /// Whether the field's current value satisfies its rule.
    ///
    /// Text fields need non-blank content, the user's age must be positive,
    /// and enum-backed or optional fields always pass.
    pub fn is_valid(&self, user: &UserProfile, partner: &SpecificPartnerDetails) -> bool {
        match self {
            FormField::Name => !user.name.trim().is_empty(),
            FormField::Age => user.age > 0,
            FormField::EyeColor => !user.eye_color.trim().is_empty(),
            FormField::FavoriteColor => !user.favorite_color.trim().is_empty(),
            FormField::StressReaction => !user.stress_reaction.trim().is_empty(),
            FormField::PartnerName => !partner.name.trim().is_empty(),
            FormField::PartnerReligion => !partner.religion.trim().is_empty(),
            FormField::Gender
            | FormField::Zodiac
            | FormField::GenderPreference
            | FormField::PartnerTraitsPreference
            | FormField::AdditionalDetails
            | FormField::PartnerAge
            | FormField::PartnerGender => true,
        }
    }

    /// Whether the user has put something into the field.
    pub fn has_value(&self, user: &UserProfile, partner: &SpecificPartnerDetails) -> bool {
        match self {
            FormField::Name => !user.name.trim().is_empty(),
            FormField::Age => user.age != 0,
            FormField::EyeColor => !user.eye_color.trim().is_empty(),
            FormField::FavoriteColor => !user.favorite_color.trim().is_empty(),
            FormField::StressReaction => !user.stress_reaction.trim().is_empty(),
            FormField::PartnerTraitsPreference => !user.partner_traits_preference.trim().is_empty(),
            FormField::AdditionalDetails => !user.additional_details.trim().is_empty(),
            FormField::PartnerName => !partner.name.trim().is_empty(),
            FormField::PartnerGender => !partner.gender.trim().is_empty(),
            FormField::PartnerReligion => !partner.religion.trim().is_empty(),
            FormField::Gender | FormField::Zodiac | FormField::GenderPreference | FormField::PartnerAge => {
                true
            }
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The three personality sliders on step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slider {
    IntrovertExtrovert,
    LogicEmotion,
    AdventureRoutine,
}

impl Slider {
    pub const ALL: [Slider; 3] = [Slider::IntrovertExtrovert, Slider::LogicEmotion, Slider::AdventureRoutine];

    /// Label plus the captions for the 0 and 100 ends.
    pub fn labels(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Slider::IntrovertExtrovert => ("Social Battery", "Solitary", "Social"),
            Slider::LogicEmotion => ("Decision Making", "Heart", "Head"),
            Slider::AdventureRoutine => ("Lifestyle Rhythm", "Structured", "Spontaneous"),
        }
    }
}

/// Fields that gate leaving `step` (forward, or submitting on the final step).
pub fn required_fields(mode: PredictionMode, step: u8) -> &'static [FormField] {
    match (mode, step) {
        (_, 1) => &[FormField::Name, FormField::Age, FormField::EyeColor],
        (_, 2) => &[FormField::FavoriteColor, FormField::StressReaction],
        (_, 3) => &[FormField::GenderPreference],
        (PredictionMode::Measure, 4) => &[FormField::PartnerName, FormField::PartnerReligion],
        _ => &[],
    }
}

/// Fields shown on `step`, in display order.
pub fn step_fields(mode: PredictionMode, step: u8) -> &'static [FormField] {
    match (mode, step) {
        (_, 1) => &[FormField::Name, FormField::Age, FormField::Gender, FormField::Zodiac, FormField::EyeColor],
        (_, 2) => &[FormField::FavoriteColor, FormField::StressReaction],
        (_, 3) => &[
            FormField::GenderPreference,
            FormField::PartnerTraitsPreference,
            FormField::AdditionalDetails,
        ],
        (PredictionMode::Measure, 4) => &[
            FormField::PartnerName,
            FormField::PartnerAge,
            FormField::PartnerGender,
            FormField::PartnerReligion,
        ],
        _ => &[],
    }
}

/// Title and subtitle of a form step.
pub fn step_title(step: u8) -> (&'static str, &'static str) {
    match step {
        1 => ("Essence & Identity", "Calibrating Astral Baseline"),
        2 => ("Inner Landscape", "Mapping Psychological Terrain"),
        3 => ("Concepts & Resonance", "Defining Unique Energy Concepts"),
        4 => ("Love Calculator Inputs", "Inputting Target Variables"),
        _ => ("", ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_invalid() {
        let user = UserProfile {
            name: "   ".to_string(),
            ..UserProfile::default()
        };
        let partner = SpecificPartnerDetails::default();
        assert!(!FormField::Name.is_valid(&user, &partner));
        assert!(!FormField::PartnerName.is_valid(&user, &partner));
        assert!(!FormField::PartnerReligion.is_valid(&user, &partner));
    }

    #[test]
    fn age_must_be_positive() {
        let partner = SpecificPartnerDetails::default();
        for (age, valid) in [(0, false), (-2, false), (1, true), (30, true)] {
            let user = UserProfile {
                age,
                ..UserProfile::default()
            };
            assert_eq!(FormField::Age.is_valid(&user, &partner), valid, "age {}", age);
        }
    }

    #[test]
    fn partner_age_has_no_positivity_rule() {
        let partner = SpecificPartnerDetails {
            age: 0,
            ..SpecificPartnerDetails::default()
        };
        assert!(FormField::PartnerAge.is_valid(&UserProfile::default(), &partner));
    }

    #[test]
    fn enum_fields_are_always_valid() {
        let user = UserProfile::default();
        let partner = SpecificPartnerDetails::default();
        assert!(FormField::Gender.is_valid(&user, &partner));
        assert!(FormField::Zodiac.is_valid(&user, &partner));
        assert!(FormField::GenderPreference.is_valid(&user, &partner));
    }

    #[test]
    fn step_requirements_follow_the_form() {
        assert_eq!(
            required_fields(PredictionMode::Archetype, 1),
            &[FormField::Name, FormField::Age, FormField::EyeColor]
        );
        assert_eq!(required_fields(PredictionMode::Archetype, 3), &[FormField::GenderPreference]);
        assert!(required_fields(PredictionMode::Archetype, 4).is_empty());
        assert_eq!(
            required_fields(PredictionMode::Measure, 4),
            &[FormField::PartnerName, FormField::PartnerReligion]
        );
    }

    #[test]
    fn field_keys_match_profile_json() {
        assert_eq!(FormField::EyeColor.key(), "eyeColor");
        assert_eq!(FormField::PartnerReligion.key(), "partnerReligion");
    }

    #[test]
    fn step_titles() {
        assert_eq!(step_title(1).0, "Essence & Identity");
        assert_eq!(step_title(4).0, "Love Calculator Inputs");
    }
}
