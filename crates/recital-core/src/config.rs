//! Skill configuration.
//!
//! Environment-sourced values are materialized once into an explicit struct
//! (see `recital-infrastructure`'s `ConfigService`) and handed to the
//! dispatcher at construction. Handler logic never performs implicit
//! process-wide lookups.

use serde::{Deserialize, Serialize};

/// Configuration for a `SkillHandler`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Application id the voice platform must present on every inbound event.
    pub application_id: String,
    /// Version tag stamped on every response envelope.
    #[serde(default = "default_response_version")]
    pub response_version: String,
}

fn default_response_version() -> String {
    "1.0".to_string()
}

impl SkillConfig {
    /// Creates a configuration with the default response version.
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            response_version: default_response_version(),
        }
    }
}
