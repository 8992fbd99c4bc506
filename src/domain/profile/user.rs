//! The user's self-reported profile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Percentage, ValidationError};

/// Eye colours offered by the picker before falling back to free text.
pub const EYE_COLOR_PALETTE: [&str; 6] = ["Brown", "Blue", "Green", "Hazel", "Gray", "Amber"];

/// The user's own gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    #[default]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender of the partner the user is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GenderPreference {
    #[default]
    Male,
    Female,
}

impl GenderPreference {
    pub const ALL: [GenderPreference; 2] = [GenderPreference::Female, GenderPreference::Male];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenderPreference::Male => "Male",
            GenderPreference::Female => "Female",
        }
    }
}

impl fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Western zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ZodiacSign {
    #[default]
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ZodiacSign::ALL
            .into_iter()
            .find(|sign| sign.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::invalid_format("zodiac", format!("unknown sign '{}'", s)))
    }
}

/// A selection made in the eye colour picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EyeColorChoice {
    /// One of [`EYE_COLOR_PALETTE`].
    Palette(&'static str),
    /// "Other (Specify)": the stored value is cleared so the user types one.
    Other,
}

impl EyeColorChoice {
    /// The value the profile stores for this selection.
    pub fn stored_value(&self) -> &'static str {
        match self {
            EyeColorChoice::Palette(color) => color,
            EyeColorChoice::Other => "",
        }
    }

    /// Which picker entry a stored value corresponds to.
    pub fn for_stored(value: &str) -> Self {
        EYE_COLOR_PALETTE
            .iter()
            .find(|color| **color == value)
            .map(|color| EyeColorChoice::Palette(color))
            .unwrap_or(EyeColorChoice::Other)
    }
}

/// Everything the user reports about themselves.
///
/// Serialized with camelCase keys; that JSON block is what the prompts embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub zodiac: ZodiacSign,
    pub eye_color: String,
    pub introvert_extrovert: Percentage,
    pub logic_emotion: Percentage,
    pub adventure_routine: Percentage,
    pub gender_preference: GenderPreference,
    pub favorite_color: String,
    pub stress_reaction: String,
    /// Comma-joined trait tags; see [`TraitTags`](super::TraitTags).
    pub partner_traits_preference: String,
    pub additional_details: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 25,
            gender: Gender::Female,
            zodiac: ZodiacSign::Aries,
            eye_color: "Brown".to_string(),
            introvert_extrovert: Percentage::HALF,
            logic_emotion: Percentage::HALF,
            adventure_routine: Percentage::HALF,
            gender_preference: GenderPreference::Male,
            favorite_color: "Blue".to_string(),
            stress_reaction: "I analyze the situation".to_string(),
            partner_traits_preference: String::new(),
            additional_details: String::new(),
        }
    }
}

impl UserProfile {
    /// The profile as the structured text block sent to the model.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Parses numeric form input the way the age box does: anything unparsable is 0.
pub(crate) fn parse_age_input(raw: &str) -> i32 {
    raw.trim().parse::<i32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_initial_form_values() {
        let user = UserProfile::default();
        assert_eq!(user.name, "");
        assert_eq!(user.age, 25);
        assert_eq!(user.gender, Gender::Female);
        assert_eq!(user.zodiac, ZodiacSign::Aries);
        assert_eq!(user.eye_color, "Brown");
        assert_eq!(user.introvert_extrovert, Percentage::HALF);
        assert_eq!(user.gender_preference, GenderPreference::Male);
        assert_eq!(user.favorite_color, "Blue");
        assert_eq!(user.stress_reaction, "I analyze the situation");
    }

    #[test]
    fn profile_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(json["eyeColor"], "Brown");
        assert_eq!(json["genderPreference"], "Male");
        assert_eq!(json["zodiac"], "Aries");
        assert_eq!(json["introvertExtrovert"], 50);
        assert!(json.get("partnerTraitsPreference").is_some());
    }

    #[test]
    fn zodiac_parses_case_insensitively() {
        assert_eq!("scorpio".parse::<ZodiacSign>().unwrap(), ZodiacSign::Scorpio);
        assert_eq!(" Pisces ".parse::<ZodiacSign>().unwrap(), ZodiacSign::Pisces);
        assert!("Ophiuchus".parse::<ZodiacSign>().is_err());
    }

    #[test]
    fn zodiac_has_twelve_signs() {
        assert_eq!(ZodiacSign::ALL.len(), 12);
        assert_eq!(ZodiacSign::ALL[11].to_string(), "Pisces");
    }

    #[test]
    fn eye_color_other_clears_value() {
        assert_eq!(EyeColorChoice::Other.stored_value(), "");
        assert_eq!(EyeColorChoice::Palette("Hazel").stored_value(), "Hazel");
    }

    #[test]
    fn eye_color_maps_custom_values_to_other() {
        assert_eq!(EyeColorChoice::for_stored("Green"), EyeColorChoice::Palette("Green"));
        assert_eq!(EyeColorChoice::for_stored("Violet"), EyeColorChoice::Other);
        assert_eq!(EyeColorChoice::for_stored(""), EyeColorChoice::Other);
    }

    #[test]
    fn age_input_falls_back_to_zero() {
        assert_eq!(parse_age_input("30"), 30);
        assert_eq!(parse_age_input(" 41 "), 41);
        assert_eq!(parse_age_input("thirty"), 0);
        assert_eq!(parse_age_input(""), 0);
        assert_eq!(parse_age_input("-3"), -3);
    }
}
