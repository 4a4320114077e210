//! Durable step log backends.
//!
//! `TomlStepLogRepository` persists the step log to a single TOML file via
//! [`AtomicTomlFile`], keeping both the full append-only history and a
//! per-user last-step record. File I/O is synchronous, so every operation is
//! pushed onto the blocking thread pool.
//!
//! `MemoryStepLogRepository` is a process-local backend for tests and
//! ephemeral deployments.

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use recital_core::step_log::{LastStepRecord, StepLogRepository, StepRecord};
use recital_core::{RecitalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// On-disk shape of the step log file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepLogFile {
    /// Every step event ever appended, in order.
    #[serde(default)]
    pub history: Vec<StepRecord>,
    /// Last-known position per user id, overwritten on each append.
    #[serde(default)]
    pub last: HashMap<String, LastStepRecord>,
}

/// TOML-file-backed step log.
pub struct TomlStepLogRepository {
    path: PathBuf,
}

impl TomlStepLogRepository {
    /// Creates a repository backed by the file at `path`.
    ///
    /// The file and its parent directories are created on first append.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn file(&self) -> AtomicTomlFile<StepLogFile> {
        AtomicTomlFile::new(self.path.clone())
    }
}

#[async_trait]
impl StepLogRepository for TomlStepLogRepository {
    async fn append_step(&self, user_id: &str, recipe: &str, step_index: usize) -> Result<()> {
        let file = self.file();
        let record = StepRecord::new(user_id, recipe, step_index);

        tokio::task::spawn_blocking(move || {
            file.update(StepLogFile::default(), |log| {
                log.last.insert(
                    record.user_id.clone(),
                    LastStepRecord {
                        recipe: record.recipe.clone(),
                        step_index: record.step_index,
                    },
                );
                log.history.push(record);
                Ok(())
            })
        })
        .await
        .map_err(|e| RecitalError::internal(format!("step log task failed: {}", e)))??;

        log::debug!("recorded step {} of '{}' for user", step_index, recipe);
        Ok(())
    }

    async fn last_step(&self, user_id: &str) -> Result<Option<LastStepRecord>> {
        let file = self.file();
        let user_id = user_id.to_string();

        let log = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| RecitalError::internal(format!("step log task failed: {}", e)))??;

        Ok(log.and_then(|log| log.last.get(&user_id).cloned()))
    }
}

/// In-memory step log, for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryStepLogRepository {
    state: Mutex<StepLogFile>,
}

impl MemoryStepLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of appended events, in test assertions.
    pub async fn history_len(&self) -> usize {
        self.state.lock().await.history.len()
    }
}

#[async_trait]
impl StepLogRepository for MemoryStepLogRepository {
    async fn append_step(&self, user_id: &str, recipe: &str, step_index: usize) -> Result<()> {
        let mut state = self.state.lock().await;
        state.last.insert(
            user_id.to_string(),
            LastStepRecord {
                recipe: recipe.to_string(),
                step_index,
            },
        );
        state
            .history
            .push(StepRecord::new(user_id, recipe, step_index));
        Ok(())
    }

    async fn last_step(&self, user_id: &str) -> Result<Option<LastStepRecord>> {
        Ok(self.state.lock().await.last.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_append_then_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlStepLogRepository::new(temp_dir.path().join("step_log.toml"));

        repo.append_step("user-1", "song", 0).await.unwrap();
        repo.append_step("user-1", "song", 1).await.unwrap();

        let last = repo.last_step("user-1").await.unwrap().unwrap();
        assert_eq!(last.recipe, "song");
        assert_eq!(last.step_index, 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_user_has_no_record() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlStepLogRepository::new(temp_dir.path().join("step_log.toml"));
        assert!(repo.last_step("nobody").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_users_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlStepLogRepository::new(temp_dir.path().join("step_log.toml"));

        repo.append_step("user-1", "song", 2).await.unwrap();
        repo.append_step("user-2", "dance", 0).await.unwrap();

        assert_eq!(
            repo.last_step("user-1").await.unwrap().unwrap().recipe,
            "song"
        );
        assert_eq!(
            repo.last_step("user-2").await.unwrap().unwrap().recipe,
            "dance"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_history_accumulates_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("step_log.toml");
        let repo = TomlStepLogRepository::new(path.clone());

        repo.append_step("user-1", "song", 0).await.unwrap();
        repo.append_step("user-1", "song", 1).await.unwrap();
        repo.append_step("user-1", "song", 0).await.unwrap();

        let log = AtomicTomlFile::<StepLogFile>::new(path)
            .load()
            .unwrap()
            .unwrap();
        assert_eq!(log.history.len(), 3);
        assert_eq!(log.last["user-1"].step_index, 0);
    }

    #[tokio::test]
    async fn test_memory_repository() {
        let repo = MemoryStepLogRepository::new();
        repo.append_step("user-1", "dance", 3).await.unwrap();
        repo.append_step("user-1", "dance", 0).await.unwrap();

        let last = repo.last_step("user-1").await.unwrap().unwrap();
        assert_eq!(last.step_index, 0);
        assert_eq!(repo.history_len().await, 2);
        assert!(repo.last_step("user-2").await.unwrap().is_none());
    }
}
