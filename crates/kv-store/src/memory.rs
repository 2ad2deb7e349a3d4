use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{Result, store::KeyValueStore};

/// In-memory key/value store.
///
/// Clones share the same underlying map, so two consumers built from one
/// handle see each other's writes. This is how tests simulate a reload or
/// a second tab writing to the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no slot holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all slots.
    pub fn clear(&self) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.remove(key);
        Ok(())
    }
}
