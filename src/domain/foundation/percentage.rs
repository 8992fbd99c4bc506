//! Percentage value object (0-100 scale).
//!
//! Used for slider positions and for every score the model returns
//! (compatibility, success probability, love-framework axes, trait intensity).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// Midpoint, the starting position of every personality slider.
    pub const HALF: Self = Self(50);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range("percentage", 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    /// Rounds and clamps an arbitrary number into range.
    ///
    /// Model output is not trusted to respect the 0-100 bound and trait
    /// scores may arrive as fractional numbers.
    pub fn saturating_from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Ok(Self::saturating_from_f64(raw))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(50).value(), 50);
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn percentage_try_new_rejects_out_of_range() {
        assert!(Percentage::try_new(0).is_ok());
        assert!(Percentage::try_new(100).is_ok());
        match Percentage::try_new(-1) {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "percentage");
                assert_eq!(min, 0);
                assert_eq!(max, 100);
                assert_eq!(actual, -1);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(Percentage::try_new(101).is_err());
    }

    #[test]
    fn saturating_from_f64_rounds_and_clamps() {
        assert_eq!(Percentage::saturating_from_f64(72.5).value(), 73);
        assert_eq!(Percentage::saturating_from_f64(-4.0).value(), 0);
        assert_eq!(Percentage::saturating_from_f64(180.0).value(), 100);
        assert_eq!(Percentage::saturating_from_f64(f64::NAN).value(), 0);
    }

    #[test]
    fn percentage_as_fraction_converts_correctly() {
        assert!((Percentage::HALF.as_fraction() - 0.5).abs() < f64::EPSILON);
        assert!((Percentage::HUNDRED.as_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percentage_displays_correctly() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
        assert_eq!(format!("{}", Percentage::ZERO), "0%");
    }

    #[test]
    fn percentage_serializes_as_bare_number() {
        let json = serde_json::to_string(&Percentage::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn percentage_deserializes_integers_and_floats() {
        let pct: Percentage = serde_json::from_str("75").unwrap();
        assert_eq!(pct.value(), 75);
        let pct: Percentage = serde_json::from_str("88.4").unwrap();
        assert_eq!(pct.value(), 88);
        let pct: Percentage = serde_json::from_str("120").unwrap();
        assert_eq!(pct.value(), 100);
    }
}
