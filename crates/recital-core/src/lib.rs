//! Recital core domain.
//!
//! Recital is a voice-skill backend: it receives structured intent events
//! from a voice platform, tracks a user's position within named
//! instructional "recipes," and returns spoken/text responses plus a small
//! amount of cross-session state persisted through a durable step log.
//!
//! # Module Structure
//!
//! - `recipe`: recipe/step model, index-based navigation, and the store
//!   loaded from a bundled resource
//! - `request`: typed inbound event envelope (parsed at the boundary)
//! - `response`: outbound envelope and speechlet builders
//! - `session`: the per-conversation attribute bag
//! - `speech`: SSML helpers
//! - `skill`: the closed intent set and the dispatcher
//! - `step_log`: repository trait for the durable step log
//!
//! Transport, the platform's NLU, and a production key-value service are
//! external collaborators; this crate only defines the seams it consumes.

pub mod config;
pub mod error;
pub mod recipe;
pub mod request;
pub mod response;
pub mod session;
pub mod skill;
pub mod speech;
pub mod step_log;

// Re-export common error type
pub use error::{RecitalError, Result};
