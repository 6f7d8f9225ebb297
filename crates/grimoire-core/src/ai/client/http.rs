//! Core AI client: HTTP setup and error mapping

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use super::config::AiClientConfig;
use crate::ai::error::AiError;

pub struct AiClient {
    http: Client,
    config: AiClientConfig,
    api_key: String,
}

impl AiClient {
    pub fn new(config: AiClientConfig, api_key: String) -> Result<Self, AiError> {
        let http = Client::builder()
            .user_agent(concat!("grimoire/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &AiClientConfig {
        &self.config
    }

    pub(super) fn build_request(&self) -> RequestBuilder {
        self.http
            .post(self.config.api_url())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
    }

    /// Turn non-2xx responses into [`AiError::Api`] with the service's message
    pub(super) async fn handle_error_response(
        &self,
        response: Response,
    ) -> Result<Response, AiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AiError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
