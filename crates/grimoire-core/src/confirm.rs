//! Confirmation gate for destructive operations
//!
//! Deleting a skill or a scenario first describes what will be lost, asks a
//! [`Confirmer`], and only then calls the repository. Cancelling changes
//! nothing.

use anyhow::Result;
use tracing::debug;

use crate::catalog::{Repository, Scenario, Skill};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructiveAction {
    DeleteSkill {
        scenario_id: String,
        skill_id: String,
    },
    DeleteScenario {
        scenario_id: String,
    },
}

/// What the user is asked before a destructive action runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub description: String,
    pub confirm_label: &'static str,
}

/// Asks the user to confirm or cancel
pub trait Confirmer {
    fn confirm(&mut self, request: &ConfirmationRequest) -> bool;
}

/// Confirms everything. For `--yes` style flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&mut self, _request: &ConfirmationRequest) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    SkillDeleted(Skill),
    ScenarioDeleted(Scenario),
    Cancelled,
    /// The target does not exist; nothing was asked
    NotFound,
}

impl DestructiveAction {
    /// Describe the loss, or `None` if the target is gone
    pub fn describe(&self, repo: &Repository) -> Option<ConfirmationRequest> {
        match self {
            DestructiveAction::DeleteSkill {
                scenario_id,
                skill_id,
            } => {
                let skill = repo.skill(scenario_id, skill_id)?;
                Some(ConfirmationRequest {
                    title: format!("Delete \"{}\"?", skill.name),
                    description: "This skill will be removed. This cannot be undone.".to_string(),
                    confirm_label: "Delete",
                })
            }
            DestructiveAction::DeleteScenario { scenario_id } => {
                let scenario = repo.scenario(scenario_id)?;
                let count = scenario.skills.len();
                let loss = match count {
                    0 => "It has no skills.".to_string(),
                    1 => "Its 1 skill will be lost with it.".to_string(),
                    n => format!("All {} of its skills will be lost with it.", n),
                };
                Some(ConfirmationRequest {
                    title: format!("Delete scenario \"{}\"?", scenario.name),
                    description: format!("{} This cannot be undone.", loss),
                    confirm_label: "Delete",
                })
            }
        }
    }

    /// Ask `confirmer`, then run the deletion only on explicit confirm
    pub fn run(
        &self,
        repo: &mut Repository,
        confirmer: &mut dyn Confirmer,
    ) -> Result<GateOutcome> {
        let Some(request) = self.describe(repo) else {
            return Ok(GateOutcome::NotFound);
        };
        if !confirmer.confirm(&request) {
            debug!(action = ?self, "Destructive action cancelled");
            return Ok(GateOutcome::Cancelled);
        }

        let outcome = match self {
            DestructiveAction::DeleteSkill {
                scenario_id,
                skill_id,
            } => repo
                .delete_skill(scenario_id, skill_id)?
                .map(GateOutcome::SkillDeleted),
            DestructiveAction::DeleteScenario { scenario_id } => repo
                .delete_scenario(scenario_id)?
                .map(GateOutcome::ScenarioDeleted),
        };
        Ok(outcome.unwrap_or(GateOutcome::NotFound))
    }
}
