//! AI Client configuration

use std::time::Duration;

use crate::config::AiSettings;
use crate::constants;

/// Configuration for the AI client
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    /// Model ID to use for API calls
    pub model: String,
    /// Optional base URL override (defaults to the public models endpoint)
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            model: constants::ai::DEFAULT_MODEL.to_string(),
            base_url: None,
            timeout: Duration::from_secs(constants::ai::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AiClientConfig {
    pub fn from_settings(settings: &AiSettings) -> Self {
        Self {
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
            timeout: settings.timeout(),
        }
    }

    /// Get the API URL to use
    pub fn api_url(&self) -> String {
        let base = self
            .base_url
            .as_deref()
            .unwrap_or(constants::ai::DEFAULT_BASE_URL)
            .trim_end_matches('/');
        format!("{}/{}:generateContent", base, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        assert_eq!(
            AiClientConfig::default().api_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let config = AiClientConfig {
            model: "m".into(),
            base_url: Some("http://localhost:8080/models/".into()),
            ..Default::default()
        };
        assert_eq!(
            config.api_url(),
            "http://localhost:8080/models/m:generateContent"
        );
    }
}
