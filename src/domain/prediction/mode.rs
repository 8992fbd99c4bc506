//! Reading mode chosen on the landing screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which reading the session produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// Generate a fictional ideal-partner archetype with a portrait.
    #[default]
    Archetype,
    /// Score compatibility against a named, real partner.
    Measure,
}

impl PredictionMode {
    /// Number of form steps collected in this mode.
    pub fn total_steps(&self) -> u8 {
        match self {
            PredictionMode::Archetype => 3,
            PredictionMode::Measure => 4,
        }
    }

    /// Label of the final submit action.
    pub fn submit_label(&self) -> &'static str {
        match self {
            PredictionMode::Archetype => "Reveal Archetype",
            PredictionMode::Measure => "Calculate Synergy",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMode::Archetype => "archetype",
            PredictionMode::Measure => "measure",
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_mode_has_an_extra_step() {
        assert_eq!(PredictionMode::Archetype.total_steps(), 3);
        assert_eq!(PredictionMode::Measure.total_steps(), 4);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PredictionMode::Measure).unwrap(), "\"measure\"");
    }
}
