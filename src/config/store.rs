//! Shared configuration storage.
//!
//! Holds the configuration resolved at startup (file plus CLI overrides)
//! so every component reads the same values.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Thread-safe config container with interior mutability.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Apply an in-place override (e.g. from command line flags).
    ///
    /// The updated config is validated; on failure the old config is kept.
    pub fn update<F>(&self, apply: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut Config),
    {
        let mut candidate = self.get();
        apply(&mut candidate);
        candidate.validate()?;
        *self.inner.write() = candidate;
        Ok(())
    }
}
