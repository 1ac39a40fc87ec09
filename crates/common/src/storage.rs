//! Namespaced key/value persistence for client-side state
//!
//! Values are stored JSON-encoded under `veritas_<key>`. Nothing here
//! propagates errors: failures are logged and loads degrade to `None`.

use crate::db::Database;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

/// Prefix applied to every storage key
pub const STORAGE_PREFIX: &str = "veritas_";

#[derive(Clone)]
pub struct LocalStorage {
    db: Database,
}

impl LocalStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// In-memory storage that disappears with the process.
    pub fn ephemeral() -> crate::Result<Self> {
        Ok(Self::new(Database::open_memory()?))
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", STORAGE_PREFIX, key)
    }

    /// Persist `value` under `key`. Returns whether the write landed.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                error!("Error saving to storage: {}", e);
                return false;
            }
        };
        match self.db.kv_set(&Self::namespaced(key), &encoded) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving to storage: {}", e);
                false
            }
        }
    }

    /// Load the value under `key`; `None` when missing or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.db.kv_get(&Self::namespaced(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!("Error loading from storage: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Error loading from storage: {}", e);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.db.kv_delete(&Self::namespaced(key)) {
            error!("Error removing from storage: {}", e);
        }
    }

    /// Unprefixed keys currently stored.
    pub fn keys(&self) -> Vec<String> {
        match self.db.kv_keys(STORAGE_PREFIX) {
            Ok(keys) => keys
                .into_iter()
                .filter_map(|k| k.strip_prefix(STORAGE_PREFIX).map(str::to_string))
                .collect(),
            Err(e) => {
                error!("Error listing storage keys: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn save_then_load_returns_equal_value() {
        let storage = LocalStorage::ephemeral().unwrap();
        assert!(storage.save("x", &json!({"a": 1})));
        let loaded: Option<Value> = storage.load("x");
        assert_eq!(loaded, Some(json!({"a": 1})));
    }

    #[test]
    fn missing_key_loads_none() {
        let storage = LocalStorage::ephemeral().unwrap();
        assert_eq!(storage.load::<Value>("nothing-here"), None);
    }

    #[test]
    fn keys_are_namespaced() {
        let db = Database::open_memory().unwrap();
        let storage = LocalStorage::new(db.clone());
        storage.save("filters", &vec!["failed", "flaky"]);

        assert!(db.kv_get("veritas_filters").unwrap().is_some());
        assert_eq!(db.kv_get("filters").unwrap(), None);
        assert_eq!(storage.keys(), vec!["filters".to_string()]);
    }

    #[test]
    fn unreadable_value_loads_none() {
        let db = Database::open_memory().unwrap();
        db.kv_set("veritas_broken", "{not json").unwrap();
        let storage = LocalStorage::new(db);
        assert_eq!(storage.load::<Value>("broken"), None);
    }

    #[test]
    fn type_mismatch_loads_none() {
        let storage = LocalStorage::ephemeral().unwrap();
        storage.save("count", &"three");
        assert_eq!(storage.load::<u32>("count"), None);
    }

    #[test]
    fn remove_deletes_value() {
        let storage = LocalStorage::ephemeral().unwrap();
        storage.save("tab", &"projects");
        storage.remove("tab");
        assert_eq!(storage.load::<String>("tab"), None);
    }
}
