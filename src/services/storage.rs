//! Key-value persistence backends for app state.
//!
//! The store only needs "read one text value, write one text value" per
//! key, so the backend is a small trait: `FileStorage` keeps one
//! `<key>.json` file per key in a directory, `MemoryStorage` keeps the
//! values in memory (ephemeral sessions, tests).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not find a platform data directory")]
    NoDataDir,
    #[error("failed to create storage directory {dir:?}: {source}")]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("failed to read stored value `{key}`: {source}")]
    Read { key: String, source: io::Error },
    #[error("failed to write stored value `{key}`: {source}")]
    Write { key: String, source: io::Error },
}

pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Durable storage: one `<key>.json` file per key inside `dir`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data directory, created on demand.
    pub fn in_app_data_dir() -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or(StorageError::NoDataDir)?
            .join("PersonaChat");

        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|source| StorageError::CreateDir { dir: dir.clone(), source })?;
        }

        Ok(Self::new(dir))
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Read {
                key: key.to_string(),
                source,
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.value_path(key), value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// In-memory storage. Clones share the same contents, so a test can keep
/// a handle to what a store instance writes.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
