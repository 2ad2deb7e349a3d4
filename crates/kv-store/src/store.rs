use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// Core trait for key/value slot implementations.
///
/// Operations are synchronous and complete immediately. A `set` replaces
/// whatever was previously stored under the key. All implementations must
/// be thread-safe (Send + Sync).
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns None if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes the value stored under `key`.
    ///
    /// Removing an empty slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Extension trait providing convenience methods for key/value stores.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Checks if a slot holds a value.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Reads and deserializes a JSON value from a slot.
    fn get_json<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes a value as JSON and writes it to a slot.
    fn set_json<V: Serialize>(&self, key: &str, value: &V) -> Result<()> {
        self.set(key, serde_json::to_string(value)?)
    }
}

// Blanket implementation for all KeyValueStore implementations
impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}
