//! Persistence gateway
//!
//! A small key-value contract plus a file-per-key implementation. The core
//! never persists on its own: the caller stores the serialized state after
//! each reduction, fire-and-forget. Two sessions writing the same user's
//! blob race last-write-wins; the store offers no versioning or conflict
//! detection.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use tracing::debug;

/// Key for the currently logged-in user pointer
pub const CURRENT_USER_KEY: &str = "todo_current_user";

/// Key for the registered-users list
pub const USERS_KEY: &str = "todo_users";

/// Key for a user's task state blob
pub fn state_key(user_id: u64) -> String {
    format!("todos_{user_id}")
}

/// Durable key-value storage, namespaced by the caller's keys.
///
/// Errors propagate unhandled: the caller decides whether to retry, ignore,
/// or surface them.
pub trait Gateway {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed gateway: one file per key under a base directory
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        debug!(?base_path, "Opened file store");
        Ok(Self { base_path })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

impl Gateway for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path).context(format!("Failed to read key: {key}"))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        fs::write(&path, value).context(format!("Failed to write key: {key}"))?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).context(format!("Failed to remove key: {key}"))?;
            debug!(key, "Removed value");
        }
        Ok(())
    }
}

/// In-memory gateway for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl Gateway for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_get_remove() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::open(temp.path().join("store")).unwrap();

        assert_eq!(store.get("missing").unwrap(), None);

        store.set("alpha", "one").unwrap();
        assert_eq!(store.get("alpha").unwrap().as_deref(), Some("one"));

        store.set("alpha", "two").unwrap();
        assert_eq!(store.get("alpha").unwrap().as_deref(), Some("two"));

        store.remove("alpha").unwrap();
        assert_eq!(store.get("alpha").unwrap(), None);

        // Removing an absent key is fine
        store.remove("alpha").unwrap();
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set(CURRENT_USER_KEY, "{\"id\":1}").unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap().as_deref(), Some("{\"id\":1}"));
    }

    #[test]
    fn test_state_key_namespaces_by_user() {
        assert_eq!(state_key(42), "todos_42");
        assert_ne!(state_key(1), state_key(2));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
