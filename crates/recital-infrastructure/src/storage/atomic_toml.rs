//! Atomic TOML file operations.
//!
//! A thin layer for safe concurrent access to TOML state files:
//!
//! - **Atomicity**: updates are all-or-nothing via tmp file + atomic rename
//! - **Isolation**: an exclusive file lock serializes updates
//! - **Durability**: explicit fsync before the rename

use recital_core::{RecitalError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a TOML file written atomically.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a handle for the file at `path`. The file need not exist yet.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: loaded and deserialized
    /// - `Ok(None)`: file does not exist or is empty
    /// - `Err(_)`: failed to read or parse
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the file atomically via tmp file + rename.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;

        // Data must hit the disk before the rename makes it visible.
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Performs a read-modify-write update under an exclusive file lock.
    ///
    /// Missing or empty files start from `default_value`. If `f` returns
    /// `Ok(())`, the modified data is written back atomically.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| RecitalError::data_access("path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| RecitalError::data_access("path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| RecitalError::data_access(format!("failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the handle drops; removing the lock file
        // is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestState {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<TestState>::new(temp_dir.path().join("state.toml"));

        let state = TestState {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&state).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<TestState>::new(temp_dir.path().join("missing.toml"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_creates_then_modifies() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<TestState>::new(temp_dir.path().join("state.toml"));

        let default = TestState {
            name: "default".to_string(),
            count: 0,
        };

        file.update(default.clone(), |state| {
            state.count += 10;
            Ok(())
        })
        .unwrap();
        assert_eq!(file.load().unwrap().unwrap().count, 10);

        file.update(default, |state| {
            state.count += 5;
            Ok(())
        })
        .unwrap();
        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.toml");
        let file = AtomicTomlFile::<TestState>::new(path.clone());

        file.save(&TestState {
            name: "test".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(!temp_dir.path().join(".state.toml.tmp").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.toml");
        fs::write(&path, "count = not-a-number").unwrap();

        let file = AtomicTomlFile::<TestState>::new(path);
        assert!(file.load().is_err());
    }
}
