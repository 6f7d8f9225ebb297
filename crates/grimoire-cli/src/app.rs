//! Command execution against the catalog and the suggestion service

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::info;

use grimoire_core::ai::{
    AiClientConfig, AiClientFactory, CharacterProfile, SuggestionClient, SuggestionSettings,
};
use grimoire_core::assistant::{
    accept_scenario, accept_skill, Finished, SuggestionOutcome, SuggestionPanel,
};
use grimoire_core::catalog::AddScenario;
use grimoire_core::confirm::{AlwaysConfirm, Confirmer, DestructiveAction, GateOutcome};
use grimoire_core::storage::{ApiKeySource, CredentialStore, Database, SqliteKvStore};
use grimoire_core::{AppConfig, Repository, SkillDraft};

use crate::cli::{
    AcceptArgs, Cli, Command, ConfigCommand, ScenarioCommand, SkillCommand, SuggestCommand,
};
use crate::{prompt, render};

pub struct App {
    config: AppConfig,
    repo: Repository,
    suggestions: SuggestionClient,
}

impl App {
    /// Load config, open the database and prepare the (lazy) AI client
    pub fn open(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => AppConfig::load_from_path(path)?,
            None => AppConfig::load()?,
        };
        let db_path = cli.db.clone().unwrap_or_else(|| config.database_path());
        let db = Database::new(&db_path)?;
        info!("Opened catalog at {:?}", db_path);

        let repo = Repository::open(Box::new(SqliteKvStore::new(db)), config.storage_key.clone());
        let factory = AiClientFactory::new(
            AiClientConfig::from_settings(&config.ai),
            ApiKeySource::default(),
        );
        let suggestions = SuggestionClient::new(
            Arc::new(factory),
            SuggestionSettings::from_settings(&config.ai),
        );
        Ok(Self::new(config, repo, suggestions))
    }

    pub fn new(config: AppConfig, repo: Repository, suggestions: SuggestionClient) -> Self {
        Self {
            config,
            repo,
            suggestions,
        }
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::List => {
                print!(
                    "{}",
                    render::scenario_list(self.repo.scenarios(), self.repo.active_scenario_id())
                );
            }
            Command::Show { scenario } => {
                let id = self.target_scenario(scenario.as_deref())?;
                if let Some(scenario) = self.repo.scenario(&id) {
                    print!("{}", render::scenario_detail(scenario));
                }
            }
            Command::Scenario(cmd) => self.scenario_command(cmd)?,
            Command::Skill(cmd) => self.skill_command(cmd)?,
            Command::Suggest(cmd) => self.suggest_command(cmd).await?,
            Command::Config(cmd) => self.config_command(cmd)?,
        }
        Ok(())
    }

    fn scenario_command(&mut self, cmd: ScenarioCommand) -> Result<()> {
        match cmd {
            ScenarioCommand::Add { name } => match self.repo.add_scenario(&name)? {
                AddScenario::Created { .. } => println!("Created scenario {}", name.trim()),
                AddScenario::Duplicate { .. } => {
                    bail!("A scenario named {:?} already exists", name.trim())
                }
                AddScenario::Ignored => bail!("Scenario name cannot be blank"),
            },
            ScenarioCommand::Select { scenario } => {
                let id = self.target_scenario(Some(&scenario))?;
                self.repo.select_scenario(&id)?;
                println!("Active scenario: {}", scenario);
            }
            ScenarioCommand::Delete { scenario, yes } => {
                let scenario_id = self.target_scenario(Some(&scenario))?;
                let action = DestructiveAction::DeleteScenario { scenario_id };
                report_gate(self.gate(&action, yes)?);
            }
        }
        Ok(())
    }

    fn skill_command(&mut self, cmd: SkillCommand) -> Result<()> {
        match cmd {
            SkillCommand::Add {
                scenario,
                name,
                description,
                mana_cost,
                origin,
            } => {
                let scenario_id = self.target_scenario(scenario.as_deref())?;
                let draft = SkillDraft {
                    name,
                    description,
                    mana_cost,
                    origin,
                };
                match self.repo.add_skill(&scenario_id, draft)? {
                    Some(id) => println!("Added skill {}", id),
                    None => bail!("Skill name and description are required"),
                }
            }
            SkillCommand::Edit {
                skill_id,
                scenario,
                name,
                description,
                mana_cost,
                origin,
            } => {
                let (scenario_id, mut draft) = {
                    let (owner, skill) = self.locate_skill(scenario.as_deref(), &skill_id)?;
                    (owner, SkillDraft::from(skill))
                };
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                // An empty value clears an optional field
                if mana_cost.is_some() {
                    draft.mana_cost = mana_cost;
                }
                if origin.is_some() {
                    draft.origin = origin;
                }
                if !self.repo.update_skill(&scenario_id, &skill_id, draft)? {
                    bail!("Skill name and description cannot be blank");
                }
                println!("Updated skill {}", skill_id);
            }
            SkillCommand::Delete {
                skill_id,
                scenario,
                yes,
            } => {
                let (scenario_id, _) = self.locate_skill(scenario.as_deref(), &skill_id)?;
                let action = DestructiveAction::DeleteSkill {
                    scenario_id,
                    skill_id,
                };
                report_gate(self.gate(&action, yes)?);
            }
        }
        Ok(())
    }

    async fn suggest_command(&mut self, cmd: SuggestCommand) -> Result<()> {
        match cmd {
            SuggestCommand::Skills {
                scenario,
                profile,
                accept,
            } => {
                let profile: CharacterProfile = profile.into();
                profile.validate()?;
                let scenario_id = self.target_scenario(scenario.as_deref())?;
                let scenario_name = self
                    .repo
                    .scenario(&scenario_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default();

                let mut panel = SuggestionPanel::new();
                let Some(ticket) = panel.begin() else {
                    bail!("A suggestion request is already running");
                };
                println!("Asking for {} powers...", scenario_name);
                let outcome = SuggestionOutcome::from(
                    self.suggestions
                        .suggest_skills(&scenario_name, &profile)
                        .await,
                );
                if !show_result(panel.finish(ticket, outcome)) {
                    return Ok(());
                }

                print!("{}", render::skill_suggestions(panel.suggestions()));
                let chosen = choose(&accept, panel.suggestions().len())?;
                let mut removed = 0;
                for index in chosen {
                    let index = index - removed;
                    let name = panel.suggestions()[index].name.clone();
                    let before = panel.suggestions().len();
                    match accept_skill(&mut panel, index, &mut self.repo, &scenario_id)? {
                        Some(_) => println!("Added {} to {}", name, scenario_name),
                        None => println!("Skipped {}: name and description are required", name),
                    }
                    removed += before - panel.suggestions().len();
                }
                if let Some(notice) = panel.exhausted_notice() {
                    println!("{}", notice);
                }
            }
            SuggestCommand::Scenarios { profile, accept } => {
                let profile: CharacterProfile = profile.into();
                profile.validate()?;

                let mut panel = SuggestionPanel::new();
                let Some(ticket) = panel.begin() else {
                    bail!("A suggestion request is already running");
                };
                println!("Asking for scenarios...");
                let outcome =
                    SuggestionOutcome::from(self.suggestions.suggest_scenarios(&profile).await);
                if !show_result(panel.finish(ticket, outcome)) {
                    return Ok(());
                }

                print!("{}", render::scenario_suggestions(panel.suggestions()));
                let chosen = choose(&accept, panel.suggestions().len())?;
                let mut removed = 0;
                for index in chosen {
                    let index = index - removed;
                    let name = panel.suggestions()[index].name.clone();
                    let before = panel.suggestions().len();
                    match accept_scenario(&mut panel, index, &mut self.repo)? {
                        Some(AddScenario::Created { .. }) => println!("Created scenario {}", name),
                        Some(AddScenario::Duplicate { .. }) => {
                            println!("Skipped {}: a scenario with that name exists", name)
                        }
                        Some(AddScenario::Ignored) | None => {
                            println!("Skipped a suggestion with a blank name")
                        }
                    }
                    removed += before - panel.suggestions().len();
                }
                if let Some(notice) = panel.exhausted_notice() {
                    println!("{}", notice);
                }
            }
        }
        Ok(())
    }

    fn config_command(&self, cmd: ConfigCommand) -> Result<()> {
        match cmd {
            ConfigCommand::SetKey { key } => {
                let mut store = CredentialStore::load()?;
                store.set_api_key(key);
                if store.api_key().is_none() {
                    bail!("API key cannot be blank");
                }
                store.save()?;
                println!("API key saved to {:?}", CredentialStore::path());
            }
            ConfigCommand::ClearKey => {
                let mut store = CredentialStore::load()?;
                store.clear();
                store.save()?;
                println!("API key removed");
            }
            ConfigCommand::Show => {
                let key_configured = ApiKeySource::default().resolve().is_some();
                print!("{}", render::config_summary(&self.config, key_configured));
            }
        }
        Ok(())
    }

    /// Scenario id for an explicit reference, or the active scenario
    fn target_scenario(&self, reference: Option<&str>) -> Result<String> {
        let scenario = match reference {
            Some(reference) => self
                .repo
                .resolve_scenario(reference)
                .with_context(|| format!("No scenario {:?}", reference))?,
            None => self
                .repo
                .active_scenario()
                .context("No active scenario. Select one with `grimoire scenario select`.")?,
        };
        Ok(scenario.id.clone())
    }

    /// Owning scenario id and the skill itself
    fn locate_skill(
        &self,
        scenario: Option<&str>,
        skill_id: &str,
    ) -> Result<(String, &grimoire_core::Skill)> {
        match scenario {
            Some(reference) => {
                let scenario_id = self.target_scenario(Some(reference))?;
                let skill = self
                    .repo
                    .skill(&scenario_id, skill_id)
                    .with_context(|| format!("No skill {} in {}", skill_id, reference))?;
                Ok((scenario_id, skill))
            }
            None => {
                let (owner, skill) = self
                    .repo
                    .find_skill(skill_id)
                    .with_context(|| format!("No skill {}", skill_id))?;
                Ok((owner.id.clone(), skill))
            }
        }
    }

    fn gate(&mut self, action: &DestructiveAction, yes: bool) -> Result<GateOutcome> {
        if yes {
            return action.run(&mut self.repo, &mut AlwaysConfirm);
        }
        let mut confirmer = prompt::LineConfirmer::new(std::io::stdin().lock(), std::io::stdout());
        action.run(&mut self.repo, &mut confirmer as &mut dyn Confirmer)
    }
}

/// Print a notice if there is nothing to pick from. True when suggestions are showing.
fn show_result(finished: Finished) -> bool {
    match finished {
        Finished::Showing(_) => true,
        Finished::Notice(message) => {
            println!("{}", message);
            false
        }
        Finished::Discarded => false,
    }
}

fn choose(accept: &AcceptArgs, count: usize) -> Result<Vec<usize>> {
    match &accept.accept {
        Some(selection) => prompt::parse_selection(selection, count),
        None => prompt::ask_selection(
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
            count,
        ),
    }
}

fn report_gate(outcome: GateOutcome) {
    match outcome {
        GateOutcome::SkillDeleted(skill) => println!("Deleted skill {}", skill.name),
        GateOutcome::ScenarioDeleted(scenario) => println!(
            "Deleted scenario {} and {} skills",
            scenario.name,
            scenario.skills.len()
        ),
        GateOutcome::Cancelled => println!("Cancelled"),
        GateOutcome::NotFound => println!("Nothing to delete"),
    }
}
