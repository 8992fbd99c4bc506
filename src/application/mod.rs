//! Application layer - Services and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod prediction_service;

pub use handlers::{SubmissionOutcome, SubmitPredictionHandler};
pub use prediction_service::PredictionService;
