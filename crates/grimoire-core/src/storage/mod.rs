//! Persistence layer
//!
//! Key-value storage for:
//! - The scenario collection (one JSON record, rewritten in full)
//! - The active-scenario selection
//! - API credentials (JSON file under the tokens directory)

use std::time::{SystemTime, UNIX_EPOCH};

mod collection;
pub mod credentials;
mod database;
mod kv;

pub use collection::CollectionStore;
pub use credentials::{ApiKeySource, CredentialStore};
pub use database::Database;
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};

/// Get current Unix timestamp in seconds
#[inline]
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
