//! Request and suggestion types for the generative service

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::{non_blank, SkillDraft};

/// One structured-output generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    /// Schema the response text must conform to
    pub response_schema: Value,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

/// Character description the suggestions are tailored to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterProfile {
    pub race: String,
    pub class: String,
    pub deity: Option<String>,
    pub level: String,
    pub notable_trait: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("character {0} is required")]
    MissingField(&'static str),
}

impl CharacterProfile {
    /// Race, class and level are required
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, value) in [
            ("race", &self.race),
            ("class", &self.class),
            ("level", &self.level),
        ] {
            if value.trim().is_empty() {
                return Err(ProfileError::MissingField(field));
            }
        }
        Ok(())
    }

    pub(crate) fn deity_or_default(&self) -> &str {
        self.deity
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("Nenhuma")
    }
}

/// A power proposed by the service, not yet in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestion {
    pub name: String,
    pub description: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub mana_cost: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,
}

/// `null`, missing, and whitespace-only strings all decode as `None`
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_blank(Option::<String>::deserialize(deserializer)?))
}

impl From<SkillSuggestion> for SkillDraft {
    fn from(s: SkillSuggestion) -> Self {
        SkillDraft {
            name: s.name,
            description: s.description,
            mana_cost: s.mana_cost,
            origin: s.origin,
        }
    }
}

/// A scenario name proposed by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSuggestion {
    pub name: String,
    pub description: String,
}
