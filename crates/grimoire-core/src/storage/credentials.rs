//! API credential storage
//!
//! Stores the generative-language API key in a JSON file, with environment
//! variables taking precedence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::paths;

/// Stored API key for the suggestion service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialStore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

impl CredentialStore {
    /// Get the credentials file path
    pub fn path() -> PathBuf {
        paths::credentials_path()
    }

    /// Load credentials from disk
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load credentials from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let store: CredentialStore = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(store)
    }

    /// Save credentials to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::path())
    }

    /// Save credentials to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = fs::metadata(path) {
                let mut permissions = metadata.permissions();
                permissions.set_mode(0o600);
                let _ = fs::set_permissions(path, permissions);
            }
        }
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(key.into().trim().to_string());
    }

    pub fn clear(&mut self) {
        self.api_key = None;
    }
}

/// Where the API key comes from
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    /// Environment variables, then the credentials file at the given path
    Environment { credentials_path: PathBuf },
    /// A fixed value (or deliberately none)
    Fixed(Option<String>),
}

impl Default for ApiKeySource {
    fn default() -> Self {
        Self::Environment {
            credentials_path: CredentialStore::path(),
        }
    }
}

impl ApiKeySource {
    /// Resolve the key. Blank values count as absent.
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Fixed(key) => key
                .as_ref()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            Self::Environment { credentials_path } => {
                for var in constants::ai::API_KEY_ENV_VARS {
                    if let Ok(value) = std::env::var(var) {
                        if !value.trim().is_empty() {
                            tracing::debug!("Using API key from ${}", var);
                            return Some(value.trim().to_string());
                        }
                    }
                }
                match CredentialStore::load_from_path(credentials_path) {
                    Ok(store) => store.api_key().map(str::to_string),
                    Err(e) => {
                        tracing::warn!("Ignoring unreadable credentials file: {:#}", e);
                        None
                    }
                }
            }
        }
    }
}
