use std::collections::HashSet;

use grimoire_core::catalog::{Repository, Scenario, SequentialIds, SkillDraft};
use grimoire_core::storage::MemoryKvStore;
use proptest::prelude::*;

const KEY: &str = "props";

#[derive(Debug, Clone)]
enum Op {
    AddSkill(usize, String),
    UpdateSkill(usize, usize, String),
    DeleteSkill(usize, usize),
    AddScenario(String),
    DeleteScenario(usize),
    Select(usize),
}

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{1,6}",
        1 => Just("   ".to_string()),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize, name()).prop_map(|(s, n)| Op::AddSkill(s, n)),
        (0..6usize, 0..4usize, name()).prop_map(|(s, k, n)| Op::UpdateSkill(s, k, n)),
        (0..6usize, 0..4usize).prop_map(|(s, k)| Op::DeleteSkill(s, k)),
        name().prop_map(Op::AddScenario),
        (0..6usize).prop_map(Op::DeleteScenario),
        (0..6usize).prop_map(Op::Select),
    ]
}

fn initial() -> Vec<Scenario> {
    vec![Scenario::new("s1", "Ataque"), Scenario::new("s2", "Defesa")]
}

fn open(kv: &MemoryKvStore, prefix: &str) -> Repository {
    Repository::open_with(
        Box::new(kv.clone()),
        KEY,
        initial(),
        Box::new(SequentialIds::new(prefix)),
    )
}

fn scenario_id(repo: &Repository, index: usize) -> String {
    repo.scenarios()
        .get(index)
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "missing".to_string())
}

fn skill_id(repo: &Repository, scenario: &str, index: usize) -> String {
    repo.scenario(scenario)
        .and_then(|s| s.skills.get(index))
        .map(|k| k.id.clone())
        .unwrap_or_else(|| "missing".to_string())
}

fn apply(repo: &mut Repository, op: &Op) {
    match op {
        Op::AddSkill(s, n) => {
            let sid = scenario_id(repo, *s);
            repo.add_skill(&sid, SkillDraft::new(n.clone(), "desc")).unwrap();
        }
        Op::UpdateSkill(s, k, n) => {
            let sid = scenario_id(repo, *s);
            let kid = skill_id(repo, &sid, *k);
            repo.update_skill(&sid, &kid, SkillDraft::new(n.clone(), "changed"))
                .unwrap();
        }
        Op::DeleteSkill(s, k) => {
            let sid = scenario_id(repo, *s);
            let kid = skill_id(repo, &sid, *k);
            repo.delete_skill(&sid, &kid).unwrap();
        }
        Op::AddScenario(n) => {
            repo.add_scenario(n).unwrap();
        }
        Op::DeleteScenario(s) => {
            let sid = scenario_id(repo, *s);
            repo.delete_scenario(&sid).unwrap();
        }
        Op::Select(s) => {
            let sid = scenario_id(repo, *s);
            repo.select_scenario(&sid).unwrap();
        }
    }
}

fn assert_active_valid(repo: &Repository) {
    match repo.active_scenario_id() {
        None => assert!(repo.scenarios().is_empty()),
        Some(id) => assert!(repo.scenario(id).is_some()),
    }
}

proptest! {
    #[test]
    fn prop_reload_matches_memory(ops in proptest::collection::vec(op(), 0..40)) {
        let kv = MemoryKvStore::new();
        let mut repo = open(&kv, "id-");
        for op in &ops {
            apply(&mut repo, op);
        }

        let reloaded = open(&kv, "other-");
        prop_assert_eq!(reloaded.scenarios(), repo.scenarios());
        prop_assert_eq!(reloaded.active_scenario_id(), repo.active_scenario_id());
    }

    #[test]
    fn prop_active_selection_always_valid(ops in proptest::collection::vec(op(), 0..40)) {
        let kv = MemoryKvStore::new();
        let mut repo = open(&kv, "id-");
        for op in &ops {
            apply(&mut repo, op);
            assert_active_valid(&repo);
        }
    }

    #[test]
    fn prop_ids_unique_and_names_distinct(ops in proptest::collection::vec(op(), 0..40)) {
        let kv = MemoryKvStore::new();
        let mut repo = open(&kv, "id-");
        for op in &ops {
            apply(&mut repo, op);
        }

        let scenario_ids: HashSet<_> = repo.scenarios().iter().map(|s| s.id.clone()).collect();
        prop_assert_eq!(scenario_ids.len(), repo.scenarios().len());

        let skills: Vec<_> = repo.scenarios().iter().flat_map(|s| s.skills.iter()).collect();
        let skill_ids: HashSet<_> = skills.iter().map(|k| k.id.clone()).collect();
        prop_assert_eq!(skill_ids.len(), skills.len());

        let names: HashSet<_> = repo.scenarios().iter().map(|s| s.name.to_lowercase()).collect();
        prop_assert_eq!(names.len(), repo.scenarios().len());
    }
}

#[test]
fn test_deleting_scenario_removes_its_skills_from_storage() {
    let kv = MemoryKvStore::new();
    let mut repo = open(&kv, "id-");
    let skill = repo
        .add_skill("s1", SkillDraft::new("Golpe", "+2"))
        .unwrap()
        .unwrap();
    repo.delete_scenario("s1").unwrap();

    let reloaded = open(&kv, "x-");
    assert!(reloaded.find_skill(&skill).is_none());
    assert_eq!(reloaded.scenarios().len(), 1);
}

#[test]
fn test_delete_active_second_of_two_selects_first() {
    let kv = MemoryKvStore::new();
    let mut repo = open(&kv, "id-");
    repo.select_scenario("s2").unwrap();
    repo.delete_scenario("s2").unwrap();
    assert_eq!(repo.active_scenario_id(), Some("s1"));
}
