//! Infrastructure layer for the Recital skill backend.
//!
//! Adapters behind the core's abstract seams:
//! - `config_service`: environment-backed, cached `SkillConfig` loading
//! - `paths`: platform config/data directory resolution
//! - `storage`: atomic TOML file primitives
//! - `step_log_repository`: durable step log backends (TOML file, in-memory)

pub mod config_service;
pub mod paths;
pub mod step_log_repository;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::RecitalPaths;
pub use step_log_repository::{MemoryStepLogRepository, TomlStepLogRepository};
pub use storage::AtomicTomlFile;
