//! Unified path management for Recital's on-disk files.
//!
//! Configuration comes from the environment (see
//! [`crate::config_service::ConfigService`]); the only durable state is the
//! step log, kept under the platform's standard data directory:
//!
//! ```text
//! ~/.local/share/recital/      # Data directory
//! └── step_log.toml            # Durable step log
//! ```

use recital_core::{RecitalError, Result};
use std::path::PathBuf;

/// Unified path resolution for Recital.
pub struct RecitalPaths;

impl RecitalPaths {
    /// Returns the Recital data directory, used for durable state.
    ///
    /// # Errors
    ///
    /// Fails with a `Configuration` error when the platform data directory
    /// cannot be determined.
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("recital"))
            .ok_or_else(|| RecitalError::configuration("cannot determine data directory"))
    }

    /// Returns the default path of the durable step log.
    pub fn step_log_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("step_log.toml"))
    }
}
