//! Durable key/value storage for client-side state.
//!
//! A [`KeyValueStore`] is a synchronous string slot map, the same contract a
//! browser's local storage offers. Two backends are provided:
//! - [`InMemoryKeyValueStore`] for tests and ephemeral sessions
//! - [`FileKeyValueStore`] for state that must survive a restart
//!
//! [`PersistedCart`] is the versioned JSON envelope written into a slot.

pub mod envelope;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use envelope::{CURRENT_SCHEMA_VERSION, PersistedCart};
pub use error::{Result, StorageError};
pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use store::{KeyValueStore, KeyValueStoreExt};
