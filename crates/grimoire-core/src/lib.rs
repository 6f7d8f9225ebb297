//! Grimoire core library
//!
//! Organizes Tormenta 20 powers ("skills") into named combat scenarios:
//! - Scenario/skill catalog with a single owning repository
//! - Key-value persistence backed by SQLite
//! - AI-assisted skill and scenario suggestions over the Generative Language API
//! - Confirmation gate for destructive operations

pub mod ai;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod confirm;
pub mod constants;
pub mod paths;
pub mod storage;

pub use catalog::{Repository, Scenario, Skill, SkillDraft};
pub use config::AppConfig;
