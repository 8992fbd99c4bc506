//! Command handlers.

pub mod prediction;

pub use prediction::{SubmissionOutcome, SubmitPredictionHandler};
