//! Application state for the crew planner API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PlanningConfig;
use crate::error::EngineResult;
use crate::store::{ConfigStore, InMemoryInstallerStore, InstallerRepository};

/// Shared application state.
///
/// Holds the configuration store and the installer repository. Cloning
/// the state clones the `Arc`s, so every handler sees the same stores.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigStore>,
    installers: Arc<dyn InstallerRepository>,
}

impl AppState {
    /// Creates a new application state from existing stores.
    pub fn new(config: Arc<ConfigStore>, installers: Arc<dyn InstallerRepository>) -> Self {
        Self { config, installers }
    }

    /// Validates `config` and pairs it with an empty in-memory installer
    /// store.
    pub fn from_config(config: PlanningConfig) -> EngineResult<Self> {
        Ok(Self::new(
            Arc::new(ConfigStore::new(config)?),
            Arc::new(InMemoryInstallerStore::new()),
        ))
    }

    /// Returns the configuration store.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Returns the installer repository.
    pub fn installers(&self) -> &dyn InstallerRepository {
        self.installers.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(ConfigStore::default()),
            Arc::new(InMemoryInstallerStore::new()),
        )
    }
}
