//! Configuration service.
//!
//! Materializes `SkillConfig` from the process environment once, caching the
//! result. Handlers receive the loaded struct and never read the environment
//! themselves.

use crate::paths::RecitalPaths;
use recital_core::config::SkillConfig;
use recital_core::{RecitalError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Application id the platform must present on every event. Required.
pub const ENV_APPLICATION_ID: &str = "RECITAL_APPLICATION_ID";

/// Version tag stamped on response envelopes. Defaults to "1.0".
pub const ENV_RESPONSE_VERSION: &str = "RECITAL_RESPONSE_VERSION";

/// Overrides the durable step log path. Defaults to the platform data dir.
pub const ENV_STEP_LOG: &str = "RECITAL_STEP_LOG";

/// Loads and caches the skill configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Cached configuration. RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<SkillConfig>>>,
}

impl ConfigService {
    /// Creates a service; the configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the skill configuration, loading from the environment if not
    /// cached.
    ///
    /// # Errors
    ///
    /// Fails with a `Configuration` error when `RECITAL_APPLICATION_ID` is
    /// unset. A skill without a configured application id cannot authorize
    /// any request.
    pub fn get_config(&self) -> Result<SkillConfig> {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_config()?;

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    /// Resolves the durable step log path: the `RECITAL_STEP_LOG` override
    /// when set, the platform data directory otherwise.
    pub fn step_log_path(&self) -> Result<PathBuf> {
        match std::env::var(ENV_STEP_LOG) {
            Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => RecitalPaths::step_log_file(),
        }
    }

    fn load_config() -> Result<SkillConfig> {
        let application_id = std::env::var(ENV_APPLICATION_ID)
            .ok()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                RecitalError::configuration(format!("{} is not set", ENV_APPLICATION_ID))
            })?;

        let mut config = SkillConfig::new(application_id);
        if let Ok(version) = std::env::var(ENV_RESPONSE_VERSION) {
            if !version.is_empty() {
                config.response_version = version;
            }
        }

        log::info!(
            "loaded configuration for application '{}'",
            config.application_id
        );
        Ok(config)
    }
}
