use thiserror::Error;

use crate::constants;

/// The suggestion service has no API key. Kept separate from [`AiError`] so
/// callers can tell "not set up" apart from "something went wrong".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("API key for the suggestion service is not configured")]
pub struct NotConfigured;

impl NotConfigured {
    /// Environment variables that satisfy the requirement
    pub fn env_vars(&self) -> &'static [&'static str] {
        constants::ai::API_KEY_ENV_VARS
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error(transparent)]
    NotConfigured(#[from] NotConfigured),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("response did not match the expected schema: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AiError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, AiError::NotConfigured(_))
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else {
            AiError::Http(err)
        }
    }
}
