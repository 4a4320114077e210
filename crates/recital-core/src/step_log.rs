//! Durable step log repository trait.
//!
//! The durable store is an external collaborator; the core consumes exactly
//! two operations: append a step event, and fetch the last-known step for a
//! user. The store is treated as a black box keyed by user identifier.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Most recent recorded position for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastStepRecord {
    /// Name of the recipe the user was navigating.
    pub recipe: String,
    /// Index of the last step spoken to the user.
    pub step_index: usize,
}

/// One appended step event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Unique record identifier (UUID format).
    pub id: String,
    pub user_id: String,
    pub recipe: String,
    pub step_index: usize,
    /// When the step was spoken.
    pub recorded_at: DateTime<Utc>,
}

impl StepRecord {
    /// Creates a record stamped with the current time.
    pub fn new(user_id: impl Into<String>, recipe: impl Into<String>, step_index: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            recipe: recipe.into(),
            step_index,
            recorded_at: Utc::now(),
        }
    }
}

/// An abstract repository for the durable step log.
///
/// Written on every navigation action; read only when session attributes
/// lack recipe/step context (session expired or cross-device continuation).
///
/// # Implementation Notes
///
/// Implementations give no transactional guarantee: concurrent requests for
/// the same user are last-writer-wins on the last-step record, which is
/// acceptable for the conversational, single-user-at-a-time usage pattern.
#[async_trait]
pub trait StepLogRepository: Send + Sync {
    /// Appends a step event and overwrites the user's last-step record.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store cannot be written.
    async fn append_step(&self, user_id: &str, recipe: &str, step_index: usize) -> Result<()>;

    /// Fetches the most recent recorded position for a user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: a position was previously recorded
    /// - `Ok(None)`: nothing recorded for this user
    /// - `Err(_)`: the underlying store cannot be read
    async fn last_step(&self, user_id: &str) -> Result<Option<LastStepRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_record_new() {
        let record = StepRecord::new("user-1", "song", 2);
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.recipe, "song");
        assert_eq!(record.step_index, 2);
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_records_have_unique_ids() {
        let a = StepRecord::new("user-1", "song", 0);
        let b = StepRecord::new("user-1", "song", 0);
        assert_ne!(a.id, b.id);
    }
}
