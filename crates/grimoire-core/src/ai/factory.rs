//! Lazy client construction
//!
//! The API key is resolved on first use and the client is cached after a
//! successful build. A missing key leaves the factory uninitialized, so a key
//! configured later is picked up on the next request.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

use super::client::{AiClient, AiClientConfig, GenerativeBackend};
use super::error::{AiError, NotConfigured};
use crate::storage::ApiKeySource;

/// Provides a ready backend on demand
pub trait BackendSource: Send + Sync {
    fn backend(&self) -> Result<Arc<dyn GenerativeBackend>, AiError>;
}

/// A backend constructed up front
pub struct FixedBackend(Arc<dyn GenerativeBackend>);

impl FixedBackend {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self(backend)
    }
}

impl BackendSource for FixedBackend {
    fn backend(&self) -> Result<Arc<dyn GenerativeBackend>, AiError> {
        Ok(self.0.clone())
    }
}

enum FactoryState {
    Uninitialized,
    Ready(Arc<AiClient>),
}

pub struct AiClientFactory {
    config: AiClientConfig,
    key_source: ApiKeySource,
    state: Mutex<FactoryState>,
}

impl AiClientFactory {
    pub fn new(config: AiClientConfig, key_source: ApiKeySource) -> Self {
        Self {
            config,
            key_source,
            state: Mutex::new(FactoryState::Uninitialized),
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(*self.state.lock(), FactoryState::Ready(_))
    }

    /// Get the cached client, building it on first call
    pub fn client(&self) -> Result<Arc<AiClient>, AiError> {
        let mut state = self.state.lock();
        if let FactoryState::Ready(client) = &*state {
            return Ok(client.clone());
        }

        let Some(api_key) = self.key_source.resolve() else {
            warn!("No API key configured for the suggestion service");
            return Err(NotConfigured.into());
        };

        let client = Arc::new(AiClient::new(self.config.clone(), api_key)?);
        debug!(model = %self.config.model, "Initialized AI client");
        *state = FactoryState::Ready(client.clone());
        Ok(client)
    }
}

impl BackendSource for AiClientFactory {
    fn backend(&self) -> Result<Arc<dyn GenerativeBackend>, AiError> {
        let client: Arc<dyn GenerativeBackend> = self.client()?;
        Ok(client)
    }
}
