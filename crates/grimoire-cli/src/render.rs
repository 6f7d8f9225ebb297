//! Plain-text rendering of catalog entries

use std::fmt::Write;

use grimoire_core::ai::{AiClientConfig, ScenarioSuggestion, SkillSuggestion};
use grimoire_core::{AppConfig, Scenario, Skill};

pub fn scenario_list(scenarios: &[Scenario], active: Option<&str>) -> String {
    if scenarios.is_empty() {
        return "No scenarios. Create one with `grimoire scenario add <NAME>`.\n".to_string();
    }
    let mut out = String::new();
    for scenario in scenarios {
        let marker = if active == Some(scenario.id.as_str()) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {} ({} skills)  [{}]",
            marker,
            scenario.name,
            scenario.skills.len(),
            scenario.id
        );
    }
    out
}

pub fn scenario_detail(scenario: &Scenario) -> String {
    let mut out = format!("{}\n", scenario.name);
    if scenario.skills.is_empty() {
        out.push_str("  No skills yet.\n");
        return out;
    }
    for skill in &scenario.skills {
        out.push_str(&skill_entry(skill));
    }
    out
}

fn skill_entry(skill: &Skill) -> String {
    let mut out = format!("  - {}", skill.name);
    if let Some(cost) = &skill.mana_cost {
        let _ = write!(out, " ({})", cost);
    }
    let _ = writeln!(out, "  [{}]", skill.id);
    let _ = writeln!(out, "    {}", skill.description);
    if let Some(origin) = &skill.origin {
        let _ = writeln!(out, "    Origin: {}", origin);
    }
    out
}

pub fn skill_suggestions(suggestions: &[SkillSuggestion]) -> String {
    let mut out = String::new();
    for (i, s) in suggestions.iter().enumerate() {
        let _ = write!(out, "{:>2}. {}", i + 1, s.name);
        if let Some(cost) = &s.mana_cost {
            let _ = write!(out, " ({})", cost);
        }
        if let Some(origin) = &s.origin {
            let _ = write!(out, " - {}", origin);
        }
        let _ = writeln!(out, "\n    {}", s.description);
    }
    out
}

pub fn scenario_suggestions(suggestions: &[ScenarioSuggestion]) -> String {
    let mut out = String::new();
    for (i, s) in suggestions.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}\n    {}", i + 1, s.name, s.description);
    }
    out
}

/// Effective settings, with defaults filled in
pub fn config_summary(config: &AppConfig, key_configured: bool) -> String {
    let client = AiClientConfig::from_settings(&config.ai);
    let mut out = String::new();
    let _ = writeln!(out, "storage key:  {}", config.storage_key);
    let _ = writeln!(out, "database:     {}", config.database_path().display());
    let _ = writeln!(out, "model:        {}", client.model);
    let _ = writeln!(out, "endpoint:     {}", client.api_url());
    let _ = writeln!(out, "timeout:      {}s", client.timeout.as_secs());
    let _ = writeln!(
        out,
        "API key:      {}",
        if key_configured { "configured" } else { "not set" }
    );
    out
}
