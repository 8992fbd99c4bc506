//! Result screen view model.
//!
//! Everything the result screen renders is derived here from the reading and
//! the profile that produced it, so front-ends only lay it out.

use crate::domain::foundation::Percentage;
use crate::domain::prediction::{
    LoveFramework, PredictionMode, PredictionResult, RelationshipStatus, TraitScore,
};
use crate::domain::profile::UserProfile;

use super::life_path;

/// Qualitative band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    HighAlignment,
    GrowthOpportunity,
    ComplexDynamic,
}

impl ScoreBand {
    pub fn for_score(score: Percentage) -> Self {
        match score.value() {
            s if s > 80 => ScoreBand::HighAlignment,
            s if s > 50 => ScoreBand::GrowthOpportunity,
            _ => ScoreBand::ComplexDynamic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::HighAlignment => "High Alignment",
            ScoreBand::GrowthOpportunity => "Growth Opportunity",
            ScoreBand::ComplexDynamic => "Complex Dynamic",
        }
    }
}

/// Colour family used for accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Emerald,
    Yellow,
    Purple,
    Gray,
    Red,
    Pink,
}

/// How a relationship status is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTreatment {
    pub status: RelationshipStatus,
    pub tone: Tone,
    pub glow: bool,
}

impl StatusTreatment {
    pub fn for_status(status: RelationshipStatus) -> Self {
        let (tone, glow) = match status {
            RelationshipStatus::MarriageMaterial => (Tone::Emerald, true),
            RelationshipStatus::CasualConnection => (Tone::Yellow, true),
            RelationshipStatus::Situationship => (Tone::Purple, true),
            RelationshipStatus::NeedBased => (Tone::Gray, false),
            RelationshipStatus::KarmicLesson => (Tone::Red, true),
        };
        Self { status, tone, glow }
    }

    /// Karmic readings get the red "karmic" styling.
    pub fn is_karmic(&self) -> bool {
        self.status == RelationshipStatus::KarmicLesson
    }

    pub fn description(&self) -> &'static str {
        self.status.description()
    }
}

/// One expandable text card under the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: &'static str,
    pub content: String,
    pub tone: Tone,
    pub open_by_default: bool,
}

/// Everything the result screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub mode: PredictionMode,
    pub headline: &'static str,
    /// Partner name, or the shadow archetype label in shadow view.
    pub display_name: String,
    /// Occupation and age for archetypes.
    pub subtitle: Option<String>,
    pub score: Percentage,
    pub score_label: &'static str,
    pub band: ScoreBand,
    pub life_path: u32,
    pub status: Option<StatusTreatment>,
    pub shadow_view: bool,
    pub shadow_lesson: Option<String>,
    pub shadow_trigger: Option<String>,
    pub cards: Vec<DetailCard>,
    /// Hidden in shadow view.
    pub love_framework: Option<LoveFramework>,
    pub traits: Vec<TraitScore>,
    pub has_portrait: bool,
    pub share_text: String,
}

impl ResultView {
    /// Builds the view. `show_shadow` is ignored unless the reading carries a
    /// shadow profile.
    pub fn build(result: &PredictionResult, user: &UserProfile, show_shadow: bool) -> Self {
        let score = result.score();
        let mut view = Self {
            mode: result.mode(),
            headline: headline(result.mode()),
            display_name: result.display_name().to_string(),
            subtitle: None,
            score,
            score_label: score_label(result.mode()),
            band: ScoreBand::for_score(score),
            life_path: life_path(user.age, &user.name),
            status: None,
            shadow_view: false,
            shadow_lesson: None,
            shadow_trigger: None,
            cards: Vec::new(),
            love_framework: Some(result.love_framework().clone()),
            traits: Vec::new(),
            has_portrait: false,
            share_text: share_text(result),
        };

        match result {
            PredictionResult::Archetype(a) => {
                view.subtitle = Some(format!("{}, {}", a.occupation, a.estimated_age));
                view.traits = a.dominant_traits.clone();
                view.has_portrait = a.image.is_some();

                match (&a.shadow_profile, show_shadow) {
                    (Some(shadow), true) => {
                        view.shadow_view = true;
                        view.display_name = shadow.archetype.clone();
                        view.shadow_lesson = Some(shadow.lesson.clone());
                        view.shadow_trigger = Some(shadow.trigger_trait.clone());
                        view.love_framework = None;
                        view.cards.push(DetailCard {
                            title: "The Shadow Dynamic",
                            content: shadow.description.clone(),
                            tone: Tone::Red,
                            open_by_default: true,
                        });
                    }
                    _ => {
                        view.cards.push(DetailCard {
                            title: "Physiological Synergy",
                            content: a.physiological_match.clone(),
                            tone: Tone::Pink,
                            open_by_default: true,
                        });
                        view.cards.push(DetailCard {
                            title: "Psychological Harmony",
                            content: a.reasoning.clone(),
                            tone: Tone::Purple,
                            open_by_default: false,
                        });
                    }
                }
            }
            PredictionResult::Measure(m) => {
                view.status = Some(StatusTreatment::for_status(m.relationship_status));
                view.cards.push(DetailCard {
                    title: "Dynamic Analysis",
                    content: m.dynamic_analysis.clone(),
                    tone: Tone::Pink,
                    open_by_default: true,
                });
                view.cards.push(DetailCard {
                    title: "Potential Friction",
                    content: m.potential_challenges.clone(),
                    tone: Tone::Gray,
                    open_by_default: false,
                });
            }
        }
        view
    }

    /// Whether the red "karmic" styling applies.
    pub fn is_karmic(&self) -> bool {
        self.shadow_view || self.status.map(|s| s.is_karmic()).unwrap_or(false)
    }
}

pub fn headline(mode: PredictionMode) -> &'static str {
    match mode {
        PredictionMode::Archetype => "Archetype Visualized",
        PredictionMode::Measure => "Love Calculator Result",
    }
}

pub fn score_label(mode: PredictionMode) -> &'static str {
    match mode {
        PredictionMode::Archetype => "Resonance Score",
        PredictionMode::Measure => "Synergy Potential",
    }
}

/// Text offered for sharing a reading.
pub fn share_text(result: &PredictionResult) -> String {
    match result {
        PredictionResult::Archetype(a) => format!(
            "✨ AuraMatch Archetype Revealed ✨\n\nDestined connection: {}, a {}.\nCompatibility: {}%\n\nDiscover yours at AuraMatch.ai",
            a.name,
            a.occupation,
            a.compatibility_score.value()
        ),
        PredictionResult::Measure(m) => format!(
            "✨ AuraMatch Love Calculator ✨\n\nCalculating synergy with {}: {}%\nStatus: {}\n\nCheck yours at AuraMatch.ai",
            m.partner_name,
            m.success_probability.value(),
            m.relationship_status.label()
        ),
    }
}

/// File name for an exported portrait: whitespace runs become hyphens.
pub fn portrait_file_name(name: &str) -> String {
    let slug: Vec<&str> = name.split_whitespace().collect();
    format!("AuraMatch-SoulCard-{}.png", slug.join("-"))
}
