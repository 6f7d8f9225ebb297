//! HTTP client for the Generative Language API

mod config;
mod generate;
mod http;

use async_trait::async_trait;

use super::error::AiError;
use super::types::GenerationRequest;

pub use self::config::AiClientConfig;
pub use self::http::AiClient;

/// Anything that can turn a [`GenerationRequest`] into response text.
/// Implemented by [`AiClient`]; tests substitute canned backends.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;
}
