//! Centralized path utilities
//!
//! All application paths in one place for consistency

use std::path::PathBuf;

use crate::constants::app;

/// Get the grimoire config directory (~/.grimoire)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app::CONFIG_DIR_NAME)
}

/// Get the logs directory (~/.grimoire/logs)
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Get the tokens directory (~/.grimoire/tokens)
pub fn tokens_dir() -> PathBuf {
    config_dir().join("tokens")
}

/// Default SQLite database location (~/.grimoire/grimoire.db)
pub fn database_path() -> PathBuf {
    config_dir().join(app::DATABASE_FILE)
}

/// Default config file location (~/.grimoire/config.toml)
pub fn config_file() -> PathBuf {
    config_dir().join(app::CONFIG_FILE)
}

/// Credentials file (~/.grimoire/tokens/credentials.json)
pub fn credentials_path() -> PathBuf {
    tokens_dir().join("credentials.json")
}
