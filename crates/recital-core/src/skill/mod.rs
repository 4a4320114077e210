//! Skill dispatch module.
//!
//! - `intent`: the closed intent set parsed from platform intent names
//! - `handler`: `SkillHandler`, the request router and intent dispatcher

mod handler;
mod intent;

pub use handler::SkillHandler;
pub use intent::Intent;
