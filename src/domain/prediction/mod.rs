//! Prediction module - the two reading modes, the result shapes the model
//! returns, and the prompt/schema pair sent for each.

mod mode;
mod prompts;
mod request;
mod result;
mod schema;

pub use mode::PredictionMode;
pub use prompts::{archetype_prompt, measure_prompt, portrait_prompt};
pub use request::PredictionRequest;
pub use result::{
    ArchetypeResult, GeneratedImage, LoveFramework, MeasureResult, PredictionResult,
    RelationshipStatus, ShadowProfile, TraitScore,
};
pub use schema::{archetype_response_schema, measure_response_schema};
