//! Structured (JSON-schema constrained) generation calls

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::http::AiClient;
use super::GenerativeBackend;
use crate::ai::error::AiError;
use crate::ai::types::GenerationRequest;

#[async_trait]
impl GenerativeBackend for AiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let body = build_body(request);
        debug!("Structured call to model: {}", self.config().model);

        let response = self.build_request().json(&body).send().await?;
        let response = self.handle_error_response(response).await?;

        let json: Value = response.json().await?;
        extract_text(&json).ok_or(AiError::EmptyResponse)
    }
}

pub(crate) fn build_body(request: &GenerationRequest) -> Value {
    let mut generation_config = json!({
        "responseMimeType": "application/json",
        "responseSchema": request.response_schema,
    });
    if let Some(temperature) = request.temperature {
        generation_config["temperature"] = json!(temperature);
    }
    if let Some(top_p) = request.top_p {
        generation_config["topP"] = json!(top_p);
    }

    json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": request.prompt}]
        }],
        "systemInstruction": {
            "parts": [{"text": request.system_instruction}]
        },
        "generationConfig": generation_config
    })
}

/// Concatenated text parts of the first candidate, if any
pub(crate) fn extract_text(json: &Value) -> Option<String> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
