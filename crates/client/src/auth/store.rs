//! Pluggable client-side state storage
//!
//! Hosts that outlive a process (desktop apps, browser embeddings) supply
//! their own store; the in-memory default matches a single-session
//! lifetime.

use std::collections::HashMap;
use std::sync::RwLock;

/// Key-value storage for persisted auth state
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store, the default when the host supplies nothing
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.slots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.slots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let store = MemoryStore::default();
        assert!(store.get("token").is_none());
        store.set("token", "T1");
        assert_eq!(store.get("token").as_deref(), Some("T1"));
        store.set("token", "T2");
        assert_eq!(store.get("token").as_deref(), Some("T2"));
        store.remove("token");
        assert!(store.get("token").is_none());
    }
}
