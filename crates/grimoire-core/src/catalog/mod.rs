//! Scenario and skill catalog
//!
//! A collection is an ordered list of scenarios, each owning an ordered list
//! of skills. The [`Repository`] is the only place the collection is mutated,
//! and every mutation rewrites the stored record in full.

mod ids;
mod repository;
mod seed;
mod types;

pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use repository::{AddScenario, Repository};
pub use seed::default_scenarios;
pub use types::{Collection, Scenario, Skill, SkillDraft};

pub(crate) use types::non_blank;
