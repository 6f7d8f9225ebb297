//! In-memory catalog with write-through persistence
//!
//! The repository owns the decoded collection and the store handle. Every
//! mutation that changes state rewrites the collection record in full.
//! Invalid input (blank names, unknown ids) leaves the collection untouched.

use anyhow::Result;
use tracing::{info, warn};

use super::ids::{IdGenerator, UuidIds};
use super::seed::default_scenarios;
use super::types::{Collection, Scenario, Skill, SkillDraft};
use crate::storage::{CollectionStore, KeyValueStore};

/// Result of [`Repository::add_scenario`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddScenario {
    /// Scenario created and made active
    Created { id: String },
    /// A scenario with the same name (case-insensitive) already exists
    Duplicate { existing_id: String },
    /// Name was blank
    Ignored,
}

struct Snapshot {
    scenarios: Collection,
    active: Option<String>,
}

pub struct Repository {
    store: Box<dyn KeyValueStore>,
    key: String,
    scenarios: Collection,
    active: Option<String>,
    ids: Box<dyn IdGenerator>,
}

impl Repository {
    /// Load the collection stored under `key`, seeding the default scenarios
    /// when nothing usable is stored
    pub fn open(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self::open_with(store, key, default_scenarios(), Box::new(UuidIds))
    }

    pub fn open_with(
        store: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        default: Collection,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let key = key.into();
        let (scenarios, stored_active) = {
            let records = CollectionStore::new(store.as_ref());
            (records.load(&key, default), records.load_active(&key))
        };

        let active = stored_active
            .filter(|id| scenarios.iter().any(|s| &s.id == id))
            .or_else(|| scenarios.first().map(|s| s.id.clone()));

        Self {
            store,
            key,
            scenarios,
            active,
            ids,
        }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, scenario_id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == scenario_id)
    }

    pub fn skill(&self, scenario_id: &str, skill_id: &str) -> Option<&Skill> {
        self.scenario(scenario_id)?.skill(skill_id)
    }

    /// Locate a skill by id across all scenarios
    pub fn find_skill(&self, skill_id: &str) -> Option<(&Scenario, &Skill)> {
        self.scenarios
            .iter()
            .find_map(|s| s.skill(skill_id).map(|k| (s, k)))
    }

    pub fn find_scenario_by_name(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.has_name(name))
    }

    /// Resolve a user-supplied reference: exact id first, then name
    pub fn resolve_scenario(&self, reference: &str) -> Option<&Scenario> {
        self.scenario(reference)
            .or_else(|| self.find_scenario_by_name(reference))
    }

    pub fn active_scenario_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_scenario(&self) -> Option<&Scenario> {
        self.active.as_deref().and_then(|id| self.scenario(id))
    }

    /// Make `scenario_id` active. Returns false if no such scenario exists.
    pub fn select_scenario(&mut self, scenario_id: &str) -> Result<bool> {
        if self.scenario(scenario_id).is_none() {
            return Ok(false);
        }
        let previous = self.active.replace(scenario_id.to_string());
        let saved = CollectionStore::new(self.store.as_ref())
            .save_active(&self.key, self.active.as_deref());
        if let Err(e) = saved {
            warn!("Failed to save active selection, keeping previous: {:#}", e);
            self.active = previous;
            return Err(e);
        }
        Ok(true)
    }

    /// Append a new skill to a scenario. Returns the new skill's id, or
    /// `None` if the scenario is unknown or the draft is invalid.
    pub fn add_skill(&mut self, scenario_id: &str, draft: SkillDraft) -> Result<Option<String>> {
        if !draft.is_valid() || self.scenario(scenario_id).is_none() {
            return Ok(None);
        }
        let id = self.ids.next_id();
        let previous = self.snapshot();
        let Some(scenario) = self.scenario_mut(scenario_id) else {
            return Ok(None);
        };
        let skill = draft.into_skill(id.clone());
        info!(scenario_id = %scenario_id, skill_id = %id, name = %skill.name, "Added skill");
        scenario.skills.push(skill);
        self.commit(previous)?;
        Ok(Some(id))
    }

    /// Replace a skill's fields in place, keeping its id and position
    pub fn update_skill(
        &mut self,
        scenario_id: &str,
        skill_id: &str,
        draft: SkillDraft,
    ) -> Result<bool> {
        if !draft.is_valid() {
            return Ok(false);
        }
        let previous = self.snapshot();
        let Some(skill) = self
            .scenario_mut(scenario_id)
            .and_then(|s| s.skills.iter_mut().find(|k| k.id == skill_id))
        else {
            return Ok(false);
        };
        *skill = draft.into_skill(skill_id.to_string());
        info!(scenario_id = %scenario_id, skill_id = %skill_id, "Updated skill");
        self.commit(previous)?;
        Ok(true)
    }

    /// Remove a skill, returning it if it existed
    pub fn delete_skill(&mut self, scenario_id: &str, skill_id: &str) -> Result<Option<Skill>> {
        let previous = self.snapshot();
        let Some(scenario) = self.scenario_mut(scenario_id) else {
            return Ok(None);
        };
        let Some(index) = scenario.skills.iter().position(|k| k.id == skill_id) else {
            return Ok(None);
        };
        let removed = scenario.skills.remove(index);
        info!(scenario_id = %scenario_id, skill_id = %skill_id, "Deleted skill");
        self.commit(previous)?;
        Ok(Some(removed))
    }

    /// Create a scenario with a trimmed name and make it active.
    ///
    /// Names are unique case-insensitively; a duplicate is rejected before
    /// anything is inserted.
    pub fn add_scenario(&mut self, name: &str) -> Result<AddScenario> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AddScenario::Ignored);
        }
        if let Some(existing) = self.find_scenario_by_name(name) {
            info!(name = %name, existing_id = %existing.id, "Rejected duplicate scenario");
            return Ok(AddScenario::Duplicate {
                existing_id: existing.id.clone(),
            });
        }

        let id = self.ids.next_id();
        let previous = self.snapshot();
        self.scenarios.push(Scenario::new(id.clone(), name));
        self.active = Some(id.clone());
        info!(scenario_id = %id, name = %name, "Added scenario");
        self.commit(previous)?;
        Ok(AddScenario::Created { id })
    }

    /// Remove a scenario and all of its skills.
    ///
    /// If it was active, the scenario now at the same index (clamped to the
    /// last one) becomes active, or nothing if the collection is empty.
    pub fn delete_scenario(&mut self, scenario_id: &str) -> Result<Option<Scenario>> {
        let Some(index) = self.scenarios.iter().position(|s| s.id == scenario_id) else {
            return Ok(None);
        };
        let previous = self.snapshot();
        let removed = self.scenarios.remove(index);

        if self.active.as_deref() == Some(scenario_id) {
            self.active = if self.scenarios.is_empty() {
                None
            } else {
                let next = index.min(self.scenarios.len() - 1);
                Some(self.scenarios[next].id.clone())
            };
        }

        info!(
            scenario_id = %scenario_id,
            skills = removed.skills.len(),
            "Deleted scenario"
        );
        self.commit(previous)?;
        Ok(Some(removed))
    }

    fn scenario_mut(&mut self, scenario_id: &str) -> Option<&mut Scenario> {
        self.scenarios.iter_mut().find(|s| s.id == scenario_id)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            scenarios: self.scenarios.clone(),
            active: self.active.clone(),
        }
    }

    /// Persist the current state, or restore `previous` if the write fails
    fn commit(&mut self, previous: Snapshot) -> Result<()> {
        let Err(e) = self.persist() else {
            return Ok(());
        };
        warn!("Failed to save collection, rolling back: {:#}", e);
        self.scenarios = previous.scenarios;
        self.active = previous.active;
        // The collection record may have been written before the active one failed
        if let Err(restore) = self.persist() {
            warn!("Failed to restore stored collection: {:#}", restore);
        }
        Err(e)
    }

    fn persist(&self) -> Result<()> {
        let records = CollectionStore::new(self.store.as_ref());
        records.save(&self.key, &self.scenarios)?;
        records.save_active(&self.key, self.active.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SequentialIds;
    use crate::storage::MemoryKvStore;

    const KEY: &str = "test-key";

    fn repo_with(scenarios: Collection) -> (Repository, MemoryKvStore) {
        let kv = MemoryKvStore::new();
        let repo = Repository::open_with(
            Box::new(kv.clone()),
            KEY,
            scenarios,
            Box::new(SequentialIds::new("id-")),
        );
        (repo, kv)
    }

    fn stored(kv: &MemoryKvStore) -> Collection {
        CollectionStore::new(kv).load(KEY, Vec::new())
    }

    #[test]
    fn test_open_seeds_defaults_and_selects_first() {
        let kv = MemoryKvStore::new();
        let repo = Repository::open(Box::new(kv), KEY);
        assert_eq!(repo.scenarios().len(), 7);
        assert_eq!(repo.active_scenario_id(), Some("acao-padrao"));
    }

    #[test]
    fn test_add_skill_appends_with_fresh_id() {
        let (mut repo, kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let id = repo
            .add_skill("s1", SkillDraft::new("Golpe Brutal", "+2 dano"))
            .unwrap()
            .unwrap();

        let skills = &repo.scenario("s1").unwrap().skills;
        assert_eq!(
            skills,
            &vec![Skill {
                id: id.clone(),
                name: "Golpe Brutal".into(),
                description: "+2 dano".into(),
                mana_cost: None,
                origin: None,
            }]
        );
        assert_eq!(stored(&kv), repo.scenarios());
    }

    #[test]
    fn test_add_skill_to_unknown_scenario_is_noop() {
        let (mut repo, kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let before = repo.scenarios().to_vec();
        let added = repo.add_skill("nope", SkillDraft::new("a", "b")).unwrap();
        assert_eq!(added, None);
        assert_eq!(repo.scenarios(), before.as_slice());
        assert_eq!(kv.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_add_skill_rejects_blank_draft() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let added = repo.add_skill("s1", SkillDraft::new("", "b")).unwrap();
        assert_eq!(added, None);
        assert!(repo.scenario("s1").unwrap().skills.is_empty());
    }

    #[test]
    fn test_update_skill_keeps_id_and_position() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let first = repo.add_skill("s1", SkillDraft::new("A", "a")).unwrap().unwrap();
        let second = repo.add_skill("s1", SkillDraft::new("B", "b")).unwrap().unwrap();

        let updated = repo
            .update_skill("s1", &first, SkillDraft::new("A2", "a2").with_mana_cost("2 PM"))
            .unwrap();
        assert!(updated);

        let skills = &repo.scenario("s1").unwrap().skills;
        assert_eq!(skills[0].id, first);
        assert_eq!(skills[0].name, "A2");
        assert_eq!(skills[0].mana_cost.as_deref(), Some("2 PM"));
        assert_eq!(skills[1].id, second);
    }

    #[test]
    fn test_update_unknown_skill_is_noop() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let draft = SkillDraft::new("a", "b");
        assert!(!repo.update_skill("s1", "missing", draft.clone()).unwrap());
        assert!(!repo.update_skill("missing", "x", draft).unwrap());
    }

    #[test]
    fn test_delete_skill() {
        let (mut repo, kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let id = repo.add_skill("s1", SkillDraft::new("A", "a")).unwrap().unwrap();
        let removed = repo.delete_skill("s1", &id).unwrap().unwrap();
        assert_eq!(removed.name, "A");
        assert!(repo.scenario("s1").unwrap().skills.is_empty());
        assert!(stored(&kv)[0].skills.is_empty());
        assert!(repo.delete_skill("s1", &id).unwrap().is_none());
    }

    #[test]
    fn test_add_scenario_trims_and_activates() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let outcome = repo.add_scenario("  Defesa  ").unwrap();
        let AddScenario::Created { id } = outcome else {
            panic!("expected creation, got {:?}", outcome);
        };
        assert_eq!(repo.scenario(&id).unwrap().name, "Defesa");
        assert_eq!(repo.active_scenario_id(), Some(id.as_str()));
    }

    #[test]
    fn test_add_scenario_blank_is_ignored() {
        let (mut repo, kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        assert_eq!(repo.add_scenario("").unwrap(), AddScenario::Ignored);
        assert_eq!(repo.add_scenario("   ").unwrap(), AddScenario::Ignored);
        assert_eq!(repo.scenarios().len(), 1);
        assert_eq!(kv.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_add_scenario_rejects_duplicate_case_insensitively() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "Ataque")]);
        let outcome = repo.add_scenario(" ataque ").unwrap();
        assert_eq!(
            outcome,
            AddScenario::Duplicate {
                existing_id: "s1".into()
            }
        );
        assert_eq!(repo.scenarios().len(), 1);
    }

    #[test]
    fn test_delete_active_last_scenario_selects_previous() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "A"), Scenario::new("s2", "B")]);
        repo.select_scenario("s2").unwrap();
        repo.delete_scenario("s2").unwrap();
        assert_eq!(repo.active_scenario_id(), Some("s1"));
    }

    #[test]
    fn test_delete_active_middle_scenario_selects_same_index() {
        let (mut repo, _kv) = repo_with(vec![
            Scenario::new("s1", "A"),
            Scenario::new("s2", "B"),
            Scenario::new("s3", "C"),
        ]);
        repo.select_scenario("s2").unwrap();
        repo.delete_scenario("s2").unwrap();
        assert_eq!(repo.active_scenario_id(), Some("s3"));
    }

    #[test]
    fn test_delete_inactive_scenario_keeps_selection() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "A"), Scenario::new("s2", "B")]);
        repo.delete_scenario("s2").unwrap();
        assert_eq!(repo.active_scenario_id(), Some("s1"));
    }

    #[test]
    fn test_delete_only_scenario_clears_selection() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "A")]);
        let removed = repo.delete_scenario("s1").unwrap().unwrap();
        assert_eq!(removed.id, "s1");
        assert_eq!(repo.active_scenario_id(), None);
        assert!(repo.scenarios().is_empty());
    }

    #[test]
    fn test_select_unknown_scenario() {
        let (mut repo, _kv) = repo_with(vec![Scenario::new("s1", "A")]);
        assert!(!repo.select_scenario("nope").unwrap());
        assert_eq!(repo.active_scenario_id(), Some("s1"));
    }

    #[test]
    fn test_active_selection_survives_reopen() {
        let kv = MemoryKvStore::new();
        {
            let mut repo = Repository::open(Box::new(kv.clone()), KEY);
            repo.select_scenario("reacao").unwrap();
        }
        let repo = Repository::open(Box::new(kv), KEY);
        assert_eq!(repo.active_scenario_id(), Some("reacao"));
    }

    #[test]
    fn test_resolve_scenario_by_id_or_name() {
        let (repo, _kv) = repo_with(vec![Scenario::new("s1", "Ação Livre")]);
        assert_eq!(repo.resolve_scenario("s1").unwrap().id, "s1");
        assert_eq!(repo.resolve_scenario("ação livre").unwrap().id, "s1");
        assert!(repo.resolve_scenario("other").is_none());
    }
    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn read_only_repo() -> Repository {
        Repository::open_with(
            Box::new(ReadOnlyStore),
            KEY,
            vec![Scenario::new("s1", "A"), Scenario::new("s2", "B")],
            Box::new(SequentialIds::new("id")),
        )
    }

    #[test]
    fn test_failed_save_rolls_back_add_scenario() {
        let mut repo = read_only_repo();
        assert!(repo.add_scenario("C").is_err());
        assert_eq!(repo.scenarios().len(), 2);
        assert_eq!(repo.active_scenario_id(), Some("s1"));
    }

    #[test]
    fn test_failed_save_rolls_back_delete_scenario() {
        let mut repo = read_only_repo();
        assert!(repo.delete_scenario("s1").is_err());
        assert!(repo.scenario("s1").is_some());
        assert_eq!(repo.active_scenario_id(), Some("s1"));
    }

    #[test]
    fn test_failed_save_rolls_back_skill_changes() {
        let mut repo = read_only_repo();
        assert!(repo.add_skill("s1", SkillDraft::new("Golpe", "d")).is_err());
        assert!(repo.scenario("s1").unwrap().skills.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_previous_selection() {
        let mut repo = read_only_repo();
        assert!(repo.select_scenario("s2").is_err());
        assert_eq!(repo.active_scenario_id(), Some("s1"));
    }
}
