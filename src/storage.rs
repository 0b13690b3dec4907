//! Persistence collaborator: key-value storage of JSON strings.
//!
//! The core persists exactly two logical records — the color library and
//! the palette list. Label instances and export artifacts are never
//! stored.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;

/// Storage key for the color library record.
pub const KEY_LIBRARY: &str = "library";
/// Storage key for the palette list record.
pub const KEY_PALETTES: &str = "palettes";

/// Key-value persistence of JSON-serialized records.
pub trait Storage {
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One `{key}.json` file per record under a root directory.
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut storage = MemoryStorage::new();
        storage.save(KEY_LIBRARY, "[1,2,3]").unwrap();
        assert_eq!(storage.load(KEY_LIBRARY).unwrap().as_deref(), Some("[1,2,3]"));
        storage.remove(KEY_LIBRARY).unwrap();
        assert_eq!(storage.load(KEY_LIBRARY).unwrap(), None);
    }

    #[test]
    fn missing_key_is_empty_not_an_error() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("nope").unwrap(), None);
    }
}
