//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerativeModel` - Hosted model that produces schema-bound JSON and images
//! - `PredictionGateway` - The archetype and compatibility readings

mod generative_model;
mod prediction_gateway;

pub use generative_model::{GenerativeModel, ImageRequest, ModelError, ModelInfo, StructuredRequest};
pub use prediction_gateway::{GatewayError, PredictionGateway};
