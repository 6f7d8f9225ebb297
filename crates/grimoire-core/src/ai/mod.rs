//! AI suggestion layer
//!
//! Asks a generative-language service for Tormenta 20 powers and scenario
//! names, constrained to a JSON response schema. The HTTP client is created
//! lazily on first use so a missing API key never affects local catalog
//! operations.

pub mod client;
mod error;
mod factory;
mod prompts;
mod schema;
mod suggestions;
mod types;

pub use client::{AiClient, AiClientConfig, GenerativeBackend};
pub use error::{AiError, NotConfigured};
pub use factory::{AiClientFactory, BackendSource, FixedBackend};
pub use suggestions::{SuggestionClient, SuggestionSettings};
pub use types::{
    CharacterProfile, GenerationRequest, ProfileError, ScenarioSuggestion, SkillSuggestion,
};
