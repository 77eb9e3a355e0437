//! Flat key-value snapshot store.
//!
//! Each feature persists its whole state as one JSON snapshot under a
//! fixed string key, the way the original browser build kept one
//! localStorage entry per feature. There is no versioning or migration
//! scheme: exactly one shape is recognized per key, and anything else is
//! treated as absent (the caller falls back to its zero value).

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Object-safe snapshot interface consumed by the tracker and the
/// feature modules. `read` returning `Ok(None)` means no snapshot has
/// ever been written for that key.
pub trait SnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Load and decode a snapshot.
///
/// Both a failed read and a corrupt payload are recovered locally by
/// returning `None`; the incident is logged but never surfaced to the
/// user action that triggered the load.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn SnapshotStore, key: &str) -> Option<T> {
    match store.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key, %error, "corrupt snapshot, treating as absent");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            tracing::warn!(key, %error, "snapshot read failed, treating as absent");
            None
        }
    }
}

/// Encode and write a snapshot.
pub fn save_snapshot<T: Serialize>(
    store: &dyn SnapshotStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(value).map_err(|source| StoreError::EncodeFailed {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &payload)
}

/// File-backed store: one `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open the store over the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self {
            dir: super::data_dir()?,
        })
    }

    /// Open the store over an explicit directory (tests, embedding).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for JsonStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key), payload).map_err(|source| StoreError::WriteFailed {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::WriteFailed {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory store. `Clone` shares the underlying map, so a tracker and
/// a test can observe the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        value: u32,
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        save_snapshot(&store, "probe", &Probe { value: 7 }).unwrap();
        let loaded: Option<Probe> = load_snapshot(&store, "probe");
        assert_eq!(loaded, Some(Probe { value: 7 }));
    }

    #[test]
    fn memory_store_clone_shares_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.write("k", "\"v\"").unwrap();
        assert_eq!(handle.read("k").unwrap().as_deref(), Some("\"v\""));
    }

    #[test]
    fn missing_key_is_absent() {
        let store = MemoryStore::new();
        let loaded: Option<Probe> = load_snapshot(&store, "nothing");
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_snapshot_is_absent() {
        let store = MemoryStore::new();
        store.write("probe", "{not json").unwrap();
        let loaded: Option<Probe> = load_snapshot(&store, "probe");
        assert!(loaded.is_none());
    }

    #[test]
    fn wrong_shape_is_absent() {
        let store = MemoryStore::new();
        store.write("probe", "[1, 2, 3]").unwrap();
        let loaded: Option<Probe> = load_snapshot(&store, "probe");
        assert!(loaded.is_none());
    }

    #[test]
    fn json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::at(dir.path());
        save_snapshot(&store, "probe", &Probe { value: 3 }).unwrap();
        let loaded: Option<Probe> = load_snapshot(&store, "probe");
        assert_eq!(loaded, Some(Probe { value: 3 }));
    }

    #[test]
    fn json_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::at(dir.path());
        store.write("probe", "1").unwrap();
        store.remove("probe").unwrap();
        store.remove("probe").unwrap();
        assert!(store.read("probe").unwrap().is_none());
    }
}
