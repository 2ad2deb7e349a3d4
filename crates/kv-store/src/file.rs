use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::{Result, StorageError, store::KeyValueStore};

type Slots = BTreeMap<String, String>;

/// File-backed key/value store.
///
/// All slots live in a single JSON object on disk. Writes go to a sibling
/// temporary file which is then renamed over the original, so a crash
/// mid-write leaves the previous contents intact. A missing file reads as
/// an empty store.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Opens a store at `path`, creating parent directories as needed.
    ///
    /// The file itself is created lazily on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<Slots> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Slots::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Slots::new()),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let raw = serde_json::to_string_pretty(slots)?;
        fs::write(&tmp, raw).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), slots = slots.len(), "storage file written");
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Slots)) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots = self.read_slots()?;
        f(&mut slots);
        self.write_slots(&slots)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.modify(|slots| {
            slots.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|slots| {
            slots.remove(key);
        })
    }
}
