//! Credential storage backends.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    sync::Mutex,
};

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::session::{errors::StoreError, models::StorageKey};

/// Key-value store holding the persisted session.
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing what was there.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: StorageKey) -> Result<(), StoreError>;
}

/// Remove every credential key from the store.
pub fn clear_credentials(store: &dyn SessionStore) -> Result<(), StoreError> {
    for key in StorageKey::ALL {
        store.remove(key)?;
    }

    Ok(())
}

/// Session persisted as a flat JSON object on disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(error) => return Err(StoreError::Io(error)),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Like `read`, but a corrupt file reads as empty so it can be overwritten.
    fn read_or_empty(&self) -> Result<Map<String, Value>, StoreError> {
        match self.read() {
            Err(StoreError::Serde(error)) => {
                warn!(path = %self.path.display(), %error, "discarding corrupt session file");
                Ok(Map::new())
            }
            other => other,
        }
    }

    /// Replace the file through a sibling temp file so readers never see a partial write.
    fn write(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(entries)?;

        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = NamedTempFile::new_in(dir).map_err(StoreError::Io)?;

        file.write_all(&contents).map_err(StoreError::Io)?;
        file.as_file().sync_all().map_err(StoreError::Io)?;

        file.persist(&self.path)
            .map_err(|persist| StoreError::Io(persist.error))?;

        debug!(path = %self.path.display(), "session file written");

        Ok(())
    }

    fn update(
        &self,
        read: fn(&Self) -> Result<Map<String, Value>, StoreError>,
        change: impl FnOnce(&mut Map<String, Value>),
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_poisoned| StoreError::Poisoned)?;

        let mut entries = read(self)?;

        change(&mut entries);

        self.write(&entries)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_poisoned| StoreError::Poisoned)?;

        let entries = self.read()?;

        Ok(entries
            .get(key.as_str())
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.update(Self::read, |entries| {
            entries.insert(key.as_str().to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.update(Self::read_or_empty, |entries| {
            entries.remove(key.as_str());
        })
    }
}

/// Process-local store, used by tests and one-shot commands.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<FxHashMap<StorageKey, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_poisoned| StoreError::Poisoned)?;

        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_poisoned| StoreError::Poisoned)?
            .insert(key, value.to_string());

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_poisoned| StoreError::Poisoned)?
            .remove(&key);

        Ok(())
    }
}
