//! Skill and scenario suggestions
//!
//! Both operations share one protocol: build a prompt from the character
//! profile, request JSON matching a fixed schema, and decode it. A missing
//! API key is reported as [`NotConfigured`]; every other failure is logged
//! and collapsed to `None`.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::client::GenerativeBackend;
use super::error::{AiError, NotConfigured};
use super::factory::{BackendSource, FixedBackend};
use super::prompts;
use super::schema;
use super::types::{CharacterProfile, GenerationRequest, ScenarioSuggestion, SkillSuggestion};
use crate::config::AiSettings;
use crate::constants;

/// Sampling and timeout parameters for suggestion requests
#[derive(Debug, Clone)]
pub struct SuggestionSettings {
    pub timeout: Duration,
    pub skill_temperature: f32,
    pub scenario_temperature: f32,
    pub top_p: f32,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(constants::ai::DEFAULT_TIMEOUT_SECS),
            skill_temperature: constants::ai::SKILL_TEMPERATURE,
            scenario_temperature: constants::ai::SCENARIO_TEMPERATURE,
            top_p: constants::ai::TOP_P,
        }
    }
}

impl SuggestionSettings {
    pub fn from_settings(settings: &AiSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            skill_temperature: settings.skill_temperature,
            scenario_temperature: settings.scenario_temperature,
            top_p: settings.top_p,
        }
    }
}

pub struct SuggestionClient {
    source: Arc<dyn BackendSource>,
    settings: SuggestionSettings,
}

impl SuggestionClient {
    pub fn new(source: Arc<dyn BackendSource>, settings: SuggestionSettings) -> Self {
        Self { source, settings }
    }

    /// Client over a backend that needs no lazy setup
    pub fn with_backend(backend: Arc<dyn GenerativeBackend>, settings: SuggestionSettings) -> Self {
        Self::new(Arc::new(FixedBackend::new(backend)), settings)
    }

    /// Suggest existing powers for a scenario and character
    pub async fn suggest_skills(
        &self,
        scenario_name: &str,
        profile: &CharacterProfile,
    ) -> Result<Option<Vec<SkillSuggestion>>, NotConfigured> {
        let request = GenerationRequest {
            system_instruction: prompts::SKILL_SYSTEM_INSTRUCTION.to_string(),
            prompt: prompts::skill_prompt(scenario_name, profile),
            response_schema: schema::skill_list_schema(),
            temperature: Some(self.settings.skill_temperature),
            top_p: Some(self.settings.top_p),
        };
        self.request_list(&request, "skill").await
    }

    /// Suggest scenario names for organizing a character's powers
    pub async fn suggest_scenarios(
        &self,
        profile: &CharacterProfile,
    ) -> Result<Option<Vec<ScenarioSuggestion>>, NotConfigured> {
        let request = GenerationRequest {
            system_instruction: prompts::SCENARIO_SYSTEM_INSTRUCTION.to_string(),
            prompt: prompts::scenario_prompt(profile),
            response_schema: schema::scenario_list_schema(),
            temperature: Some(self.settings.scenario_temperature),
            top_p: Some(self.settings.top_p),
        };
        self.request_list(&request, "scenario").await
    }

    async fn request_list<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
        kind: &str,
    ) -> Result<Option<Vec<T>>, NotConfigured> {
        debug!(kind = %kind, "Requesting suggestions");
        match self.generate(request).await {
            Ok(text) => match parse_list::<T>(&text) {
                Ok(items) => {
                    debug!(kind = %kind, count = items.len(), "Received suggestions");
                    Ok(Some(items))
                }
                Err(e) => {
                    error!(kind = %kind, "Error parsing suggestion response: {}", e);
                    Ok(None)
                }
            },
            Err(AiError::NotConfigured(e)) => Err(e),
            Err(e) => {
                error!(kind = %kind, "Error generating suggestion: {}", e);
                Ok(None)
            }
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let backend = self.source.backend()?;
        tokio::time::timeout(self.settings.timeout, backend.generate(request))
            .await
            .map_err(|_| AiError::Timeout)?
    }
}

/// Decode the response text as a JSON array, tolerating a Markdown code fence
fn parse_list<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, AiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}
