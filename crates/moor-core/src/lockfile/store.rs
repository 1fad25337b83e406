//! Provider lock persistence.
//!
//! The lock lives at `<platform>/provider-lock.json`. An absent file is an
//! empty lock; a present file that fails to parse is an error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{InstallError, Result};
use crate::fs::write_atomic;

use super::types::ProviderLock;

/// Lock file name inside the platform directory.
pub const LOCKFILE_NAME: &str = "provider-lock.json";

/// Lock storage bound to one platform directory.
#[derive(Debug, Clone)]
pub struct LockfileStore {
    path: PathBuf,
}

impl LockfileStore {
    /// Store for `<platform_dir>/provider-lock.json`.
    pub fn new(platform_dir: &Path) -> Self {
        Self {
            path: platform_dir.join(LOCKFILE_NAME),
        }
    }

    /// Store for an explicit lock file path.
    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the lock from disk.
    ///
    /// Returns an empty lock if the file doesn't exist.
    pub fn load(&self) -> Result<ProviderLock> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no provider lock, starting empty");
            return Ok(ProviderLock::new());
        }

        let bytes = fs::read(&self.path).map_err(|e| InstallError::io(&self.path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| InstallError::MalformedLock {
            path: self.path.clone(),
            detail: e.to_string(),
        })
    }

    /// Save the lock atomically with 2-space indentation.
    pub fn save(&self, lock: &ProviderLock) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(lock).map_err(|e| InstallError::MalformedLock {
            path: self.path.clone(),
            detail: e.to_string(),
        })?;
        write_atomic(&self.path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockfile::LockEntry;
    use tempfile::TempDir;

    #[test]
    fn test_load_absent_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = LockfileStore::new(temp.path());

        let lock = store.load().unwrap();

        assert!(lock.is_empty());
    }

    #[test]
    fn test_load_corrupt_is_malformed_lock() {
        let temp = TempDir::new().unwrap();
        let store = LockfileStore::new(temp.path());
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err, InstallError::MalformedLock { .. }));
    }

    #[test]
    fn test_save_uses_two_space_indent() {
        let temp = TempDir::new().unwrap();
        let store = LockfileStore::new(temp.path());
        let lock = ProviderLock::from_entries(vec![
            LockEntry::new("aws", "@pulumi/aws", "latest").with_alias("aws"),
        ]);

        store.save(&lock).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"name\": \"aws\""));
        assert_eq!(store.load().unwrap(), lock);
    }
}
