//! Browser-local key/value storage backed by a JSON file.
//!
//! Holds the same keys the web front end keeps in `localStorage`:
//! `token`, `user`, `rememberedEmail` and `reports`. Every write is flushed
//! to disk immediately.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-serialized session user record.
pub const USER_KEY: &str = "user";

/// Key holding the login form's remembered email.
pub const REMEMBERED_EMAIL_KEY: &str = "rememberedEmail";

/// Key holding the JSON-serialized audit log.
pub const REPORTS_KEY: &str = "reports";

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("Local store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Local store is not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// File-backed string key/value store.
pub struct LocalStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store; the file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LocalStoreError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Default location: `<data_dir>/vedavayu/local_store.json`.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("vedavayu")
            .join("local_store.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        self.set_all(&[(key, value)])
    }

    /// Write several keys with a single flush. Nothing changes if the flush fails.
    pub fn set_all(&self, pairs: &[(&str, &str)]) -> Result<(), LocalStoreError> {
        let mut entries = self.lock();
        let mut next = entries.clone();
        for (key, value) in pairs {
            next.insert(key.to_string(), value.to_string());
        }
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    /// Remove a key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        self.remove_all(&[key])
    }

    /// Remove several keys with a single flush. Nothing changes if the flush fails.
    pub fn remove_all(&self, keys: &[&str]) -> Result<(), LocalStoreError> {
        let mut entries = self.lock();
        if !keys.iter().any(|k| entries.contains_key(*k)) {
            return Ok(());
        }
        let mut next = entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a consistent map of strings.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), LocalStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::scratch_path;
    use super::*;

    #[test]
    fn test_missing_file_is_empty_store() {
        let store = LocalStore::open(scratch_path("missing")).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let path = scratch_path("persist");
        {
            let store = LocalStore::open(&path).unwrap();
            store.set(TOKEN_KEY, "abc123").unwrap();
            store.set(REMEMBERED_EMAIL_KEY, "a@b.c").unwrap();
        }
        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert_eq!(reopened.get(REMEMBERED_EMAIL_KEY).as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = LocalStore::open(scratch_path("remove")).unwrap();
        store.set(TOKEN_KEY, "t").unwrap();
        store.remove(TOKEN_KEY).unwrap();
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_remove_all() {
        let store = LocalStore::open(scratch_path("remove_all")).unwrap();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, "{}").unwrap();
        store.set(REPORTS_KEY, "[]").unwrap();
        store.remove_all(&[TOKEN_KEY, USER_KEY]).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(USER_KEY), None);
        assert_eq!(store.get(REPORTS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_all_writes_every_key() {
        let path = scratch_path("set_all");
        let store = LocalStore::open(&path).unwrap();
        store
            .set_all(&[(TOKEN_KEY, "abc123"), (USER_KEY, "{}")])
            .unwrap();
        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert_eq!(reopened.get(USER_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let path = scratch_path("unwritable_parent");
        let store = LocalStore::open(&path).unwrap();
        // A regular file where the parent directory should be.
        let parent = path.parent().unwrap();
        fs::create_dir_all(parent.parent().unwrap()).unwrap();
        fs::write(parent, b"").unwrap();

        assert!(store.set(TOKEN_KEY, "abc123").is_err());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert!(store
            .set_all(&[(TOKEN_KEY, "abc123"), (USER_KEY, "{}")])
            .is_err());
        assert_eq!(store.get(USER_KEY), None);
    }

    #[test]
    fn test_failed_remove_keeps_value() {
        let path = scratch_path("unwritable_file");
        let store = LocalStore::open(&path).unwrap();
        store.set(TOKEN_KEY, "abc123").unwrap();
        // Replace the store file with a directory so the next flush fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.remove_all(&[TOKEN_KEY, USER_KEY]).is_err());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert!(store.remove(TOKEN_KEY).is_err());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            LocalStore::open(&path),
            Err(LocalStoreError::Encoding(_))
        ));
    }
}
