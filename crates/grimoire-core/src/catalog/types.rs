//! Catalog data model

use serde::{Deserialize, Serialize};

/// The whole persisted state: scenarios in insertion order
pub type Collection = Vec<Scenario>;

/// A single ability entry, owned by exactly one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// A named bucket of skills for one combat situation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: Vec::new(),
        }
    }

    pub fn skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    /// Case-insensitive comparison against a trimmed name
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Skill fields without identity, as entered by the user or accepted from a
/// suggestion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDraft {
    pub name: String,
    pub description: String,
    pub mana_cost: Option<String>,
    pub origin: Option<String>,
}

impl SkillDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            mana_cost: None,
            origin: None,
        }
    }

    pub fn with_mana_cost(mut self, mana_cost: impl Into<String>) -> Self {
        self.mana_cost = Some(mana_cost.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Name and description must both be non-blank
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub(crate) fn into_skill(self, id: String) -> Skill {
        Skill {
            id,
            name: self.name,
            description: self.description,
            mana_cost: non_blank(self.mana_cost),
            origin: non_blank(self.origin),
        }
    }
}

impl From<&Skill> for SkillDraft {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            description: skill.description.clone(),
            mana_cost: skill.mana_cost.clone(),
            origin: skill.origin.clone(),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_json_uses_camel_case_and_omits_absent_fields() {
        let skill = SkillDraft::new("Golpe Brutal", "+2 dano")
            .with_mana_cost("1 PM")
            .into_skill("k1".to_string());
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["manaCost"], "1 PM");
        assert!(json.get("origin").is_none());
    }

    #[test]
    fn test_scenario_without_skills_field_decodes() {
        let scenario: Scenario = serde_json::from_str(r#"{"id":"s1","name":"Ataque"}"#).unwrap();
        assert!(scenario.skills.is_empty());
    }

    #[test]
    fn test_blank_optional_fields_are_dropped() {
        let skill = SkillDraft::new("Fúria", "desc")
            .with_origin("   ")
            .into_skill("k".to_string());
        assert_eq!(skill.origin, None);
    }

    #[test]
    fn test_draft_validation() {
        assert!(SkillDraft::new("a", "b").is_valid());
        assert!(!SkillDraft::new(" ", "b").is_valid());
        assert!(!SkillDraft::new("a", "").is_valid());
    }
}
