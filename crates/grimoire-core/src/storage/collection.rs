//! Scenario collection record
//!
//! The collection is stored as one JSON array under a fixed key and is
//! rewritten in full on every save. There is no schema version: a record
//! that fails to decode is logged and replaced by the caller's default.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::kv::KeyValueStore;
use crate::catalog::Collection;
use crate::constants::app;

pub struct CollectionStore<'a> {
    kv: &'a dyn KeyValueStore,
}

impl<'a> CollectionStore<'a> {
    pub fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv }
    }

    /// Load the collection stored under `key`, or `default` when the record is
    /// absent, unreadable, or corrupt
    pub fn load(&self, key: &str, default: Collection) -> Collection {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "No stored collection, using default");
                return default;
            }
            Err(e) => {
                warn!(key = %key, "Failed to read stored collection, using default: {:#}", e);
                return default;
            }
        };

        match serde_json::from_str::<Collection>(&raw) {
            Ok(collection) => {
                debug!(key = %key, scenarios = collection.len(), "Loaded collection");
                collection
            }
            Err(e) => {
                warn!(key = %key, "Stored collection is corrupt, resetting to default: {}", e);
                default
            }
        }
    }

    /// Overwrite the record at `key` with the whole collection
    pub fn save(&self, key: &str, collection: &Collection) -> Result<()> {
        let json = serde_json::to_string(collection).context("Failed to encode collection")?;
        self.kv
            .put(key, &json)
            .with_context(|| format!("Failed to write collection '{}'", key))
    }

    /// Active-scenario id stored alongside the collection, if any
    pub fn load_active(&self, key: &str) -> Option<String> {
        let active_key = active_key(key);
        match self.kv.get(&active_key) {
            Ok(Some(raw)) => serde_json::from_str::<Option<String>>(&raw).unwrap_or_else(|e| {
                warn!(key = %active_key, "Ignoring corrupt active selection: {}", e);
                None
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(key = %active_key, "Failed to read active selection: {:#}", e);
                None
            }
        }
    }

    pub fn save_active(&self, key: &str, active: Option<&str>) -> Result<()> {
        let json = serde_json::to_string(&active)?;
        self.kv
            .put(&active_key(key), &json)
            .context("Failed to write active selection")
    }
}

fn active_key(key: &str) -> String {
    format!("{}{}", key, app::ACTIVE_SUFFIX)
}
