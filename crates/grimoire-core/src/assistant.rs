//! Suggestion panel state
//!
//! Tracks one outstanding suggestion request at a time and the list of
//! suggestions still on display. Results from a request that was superseded
//! by [`SuggestionPanel::reset`] are dropped instead of applied.

use anyhow::Result;

use crate::ai::{NotConfigured, ScenarioSuggestion, SkillSuggestion};
use crate::catalog::{AddScenario, Repository};

/// Handle for one in-flight request
#[derive(Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Client result, classified for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome<T> {
    Ready(Vec<T>),
    Empty,
    Failed,
    NotConfigured,
}

impl<T> From<Result<Option<Vec<T>>, NotConfigured>> for SuggestionOutcome<T> {
    fn from(result: Result<Option<Vec<T>>, NotConfigured>) -> Self {
        match result {
            Err(NotConfigured) => SuggestionOutcome::NotConfigured,
            Ok(None) => SuggestionOutcome::Failed,
            Ok(Some(items)) if items.is_empty() => SuggestionOutcome::Empty,
            Ok(Some(items)) => SuggestionOutcome::Ready(items),
        }
    }
}

impl<T> SuggestionOutcome<T> {
    /// User-facing notice for anything other than a list to show
    pub fn notice(&self) -> Option<String> {
        match self {
            SuggestionOutcome::Ready(_) => None,
            SuggestionOutcome::Empty => Some(
                "No matching suggestions found. Try a more specific description.".to_string(),
            ),
            SuggestionOutcome::Failed => {
                Some("Communication with the suggestion service failed. Try again.".to_string())
            }
            SuggestionOutcome::NotConfigured => Some(format!(
                "The suggestion service API key is not configured. Set {} or run `grimoire config set-key`.",
                NotConfigured.env_vars().join(" or ")
            )),
        }
    }
}

/// What [`SuggestionPanel::finish`] did with an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finished {
    /// Suggestions are on display
    Showing(usize),
    /// Nothing to display; show this message instead
    Notice(String),
    /// The request was superseded and its result dropped
    Discarded,
}

#[derive(Debug)]
enum PanelState<T> {
    Idle,
    Loading,
    Showing(Vec<T>),
}

#[derive(Debug)]
pub struct SuggestionPanel<T> {
    state: PanelState<T>,
    generation: u64,
}

impl<T> Default for SuggestionPanel<T> {
    fn default() -> Self {
        Self {
            state: PanelState::Idle,
            generation: 0,
        }
    }
}

impl<T> SuggestionPanel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. `None` while another one is outstanding.
    pub fn begin(&mut self) -> Option<RequestTicket> {
        if self.is_loading() {
            return None;
        }
        self.generation += 1;
        self.state = PanelState::Loading;
        Some(RequestTicket(self.generation))
    }

    /// Apply a finished request. A stale ticket's outcome is discarded.
    pub fn finish(&mut self, ticket: RequestTicket, outcome: SuggestionOutcome<T>) -> Finished {
        if ticket.0 != self.generation || !self.is_loading() {
            tracing::debug!("Discarding stale suggestion result");
            return Finished::Discarded;
        }
        let notice = outcome.notice();
        match outcome {
            SuggestionOutcome::Ready(items) => {
                let count = items.len();
                self.state = PanelState::Showing(items);
                Finished::Showing(count)
            }
            _ => {
                self.state = PanelState::Idle;
                Finished::Notice(notice.unwrap_or_default())
            }
        }
    }

    /// Close the panel; an outstanding request's result will be discarded
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = PanelState::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::Loading)
    }

    pub fn suggestions(&self) -> &[T] {
        match &self.state {
            PanelState::Showing(items) => items,
            _ => &[],
        }
    }

    /// True once every displayed suggestion has been accepted
    pub fn is_exhausted(&self) -> bool {
        matches!(&self.state, PanelState::Showing(items) if items.is_empty())
    }

    pub fn exhausted_notice(&self) -> Option<&'static str> {
        self.is_exhausted()
            .then_some("All suggestions have been added.")
    }

    /// Remove a suggestion from the display, handing it to the caller
    pub fn take(&mut self, index: usize) -> Option<T> {
        match &mut self.state {
            PanelState::Showing(items) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }
}

/// Add the suggestion at `index` to a scenario as if entered by hand.
///
/// The suggestion leaves the panel only once the skill is added; one the
/// repository rejects stays on display.
pub fn accept_skill(
    panel: &mut SuggestionPanel<SkillSuggestion>,
    index: usize,
    repo: &mut Repository,
    scenario_id: &str,
) -> Result<Option<String>> {
    let Some(suggestion) = panel.suggestions().get(index).cloned() else {
        return Ok(None);
    };
    let added = repo.add_skill(scenario_id, suggestion.into())?;
    if added.is_some() {
        panel.take(index);
    }
    Ok(added)
}

/// Create a scenario from the suggestion at `index`. A blank name stays on
/// display; a created or duplicate one is removed.
pub fn accept_scenario(
    panel: &mut SuggestionPanel<ScenarioSuggestion>,
    index: usize,
    repo: &mut Repository,
) -> Result<Option<AddScenario>> {
    let Some(name) = panel.suggestions().get(index).map(|s| s.name.clone()) else {
        return Ok(None);
    };
    let outcome = repo.add_scenario(&name)?;
    if outcome != AddScenario::Ignored {
        panel.take(index);
    }
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Scenario, SequentialIds};
    use crate::storage::MemoryKvStore;

    fn skill(name: &str) -> SkillSuggestion {
        SkillSuggestion {
            name: name.into(),
            description: format!("{} description", name),
            mana_cost: Some("1 PM".into()),
            origin: None,
        }
    }

    fn repo() -> Repository {
        Repository::open_with(
            Box::new(MemoryKvStore::new()),
            "k",
            vec![Scenario::new("s1", "Ataque")],
            Box::new(SequentialIds::new("id")),
        )
    }

    fn showing(items: Vec<SkillSuggestion>) -> SuggestionPanel<SkillSuggestion> {
        let n = items.len();
        let mut panel = SuggestionPanel::new();
        let ticket = panel.begin().unwrap();
        assert_eq!(
            panel.finish(ticket, SuggestionOutcome::Ready(items)),
            Finished::Showing(n)
        );
        panel
    }

    #[test]
    fn test_outcome_classification() {
        let ok: SuggestionOutcome<u8> = Ok(Some(vec![1])).into();
        assert_eq!(ok, SuggestionOutcome::Ready(vec![1]));
        let empty: SuggestionOutcome<u8> = Ok(Some(vec![])).into();
        assert_eq!(empty, SuggestionOutcome::Empty);
        let failed: SuggestionOutcome<u8> = Ok(None).into();
        assert_eq!(failed, SuggestionOutcome::Failed);
        let unconfigured: SuggestionOutcome<u8> = Err(NotConfigured).into();
        assert_eq!(unconfigured, SuggestionOutcome::NotConfigured);
    }

    #[test]
    fn test_notices_differ_per_outcome() {
        let failed = SuggestionOutcome::<u8>::Failed.notice().unwrap();
        let missing = SuggestionOutcome::<u8>::NotConfigured.notice().unwrap();
        let empty = SuggestionOutcome::<u8>::Empty.notice().unwrap();
        assert!(missing.contains("GEMINI_API_KEY"));
        assert_ne!(failed, missing);
        assert_ne!(failed, empty);
        assert!(SuggestionOutcome::Ready(vec![1u8]).notice().is_none());
    }

    #[test]
    fn test_duplicate_begin_is_refused() {
        let mut panel: SuggestionPanel<SkillSuggestion> = SuggestionPanel::new();
        let ticket = panel.begin();
        assert!(ticket.is_some());
        assert!(panel.is_loading());
        assert!(panel.begin().is_none());
    }

    #[test]
    fn test_stale_result_is_discarded_after_reset() {
        let mut panel = SuggestionPanel::new();
        let ticket = panel.begin().unwrap();
        panel.reset();

        let outcome = SuggestionOutcome::Ready(vec![skill("Fúria")]);
        assert_eq!(panel.finish(ticket, outcome), Finished::Discarded);
        assert!(panel.suggestions().is_empty());
        assert!(!panel.is_loading());
    }

    #[test]
    fn test_failure_returns_panel_to_idle() {
        let mut panel: SuggestionPanel<SkillSuggestion> = SuggestionPanel::new();
        let ticket = panel.begin().unwrap();
        let finished = panel.finish(ticket, SuggestionOutcome::Failed);
        let Finished::Notice(message) = finished else {
            panic!("expected a notice");
        };
        assert!(message.contains("failed"));
        assert!(!panel.is_loading());
        assert!(panel.begin().is_some());
    }

    #[test]
    fn test_accept_skill_adds_and_removes_from_list() {
        let mut panel = showing(vec![skill("Fúria"), skill("Ataque Poderoso")]);
        let mut repo = repo();

        let id = accept_skill(&mut panel, 0, &mut repo, "s1").unwrap().unwrap();

        let added = repo.skill("s1", &id).unwrap();
        assert_eq!(added.name, "Fúria");
        assert_eq!(added.mana_cost.as_deref(), Some("1 PM"));
        assert_eq!(panel.suggestions().len(), 1);
        assert_eq!(panel.suggestions()[0].name, "Ataque Poderoso");
        assert!(!panel.is_exhausted());

        accept_skill(&mut panel, 0, &mut repo, "s1").unwrap();
        assert!(panel.is_exhausted());
        assert!(panel.exhausted_notice().is_some());
    }

    #[test]
    fn test_rejected_skill_stays_on_display() {
        let mut blank = skill("Fúria");
        blank.description = "  ".into();
        let mut panel = showing(vec![blank, skill("Ataque Poderoso")]);
        let mut repo = repo();

        assert_eq!(accept_skill(&mut panel, 0, &mut repo, "s1").unwrap(), None);
        assert_eq!(panel.suggestions().len(), 2);
        assert!(repo.scenario("s1").unwrap().skills.is_empty());
    }

    #[test]
    fn test_accept_out_of_range_is_noop() {
        let mut panel = showing(vec![skill("Fúria")]);
        let mut repo = repo();
        assert_eq!(accept_skill(&mut panel, 5, &mut repo, "s1").unwrap(), None);
        assert_eq!(panel.suggestions().len(), 1);
    }

    #[test]
    fn test_accept_scenario_creates_and_activates() {
        let mut panel = SuggestionPanel::new();
        let ticket = panel.begin().unwrap();
        panel.finish(
            ticket,
            SuggestionOutcome::Ready(vec![ScenarioSuggestion {
                name: "Magias de Suporte".into(),
                description: "d".into(),
            }]),
        );
        let mut repo = repo();

        let outcome = accept_scenario(&mut panel, 0, &mut repo).unwrap().unwrap();
        let AddScenario::Created { id } = outcome else {
            panic!("expected creation");
        };
        assert_eq!(repo.active_scenario_id(), Some(id.as_str()));
        assert!(panel.is_exhausted());
    }
}
