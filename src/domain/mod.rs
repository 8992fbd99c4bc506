//! Domain layer containing the reading logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (percentages, request ids, errors, state machine)
//! - `profile` - What the user reports about themselves and a specific partner
//! - `prediction` - Reading modes, result shapes, prompts and response schemas
//! - `form` - The multi-step wizard and its request lifecycle
//! - `presentation` - Values derived locally for the loading and result screens

pub mod form;
pub mod foundation;
pub mod prediction;
pub mod presentation;
pub mod profile;
