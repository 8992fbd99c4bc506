//! Prediction handlers.

mod submit_prediction;

pub use submit_prediction::{SubmissionOutcome, SubmitPredictionHandler};
