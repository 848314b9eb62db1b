//! Local key-value store
//!
//! Each entry is a single string value under a fixed key. `FileStore` keeps
//! one file per key in the data directory; `MemoryStore` keeps everything in
//! memory and is used by tests and dry runs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::VyapaarError;

use super::file_io::{read_text, remove_if_exists, write_text_atomic};

/// Get/set/remove of string values by key
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, VyapaarError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), VyapaarError>;

    /// Remove the entry under `key`; missing keys are not an error
    fn remove(&self, key: &str) -> Result<(), VyapaarError>;
}

/// Store keeping `<dir>/<key>.json` per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, VyapaarError> {
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), VyapaarError> {
        write_text_atomic(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), VyapaarError> {
        remove_if_exists(self.path_for(key)).map(|_| ())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| *w).unwrap_or(0)
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> VyapaarError {
    VyapaarError::Storage(format!("Failed to acquire lock: {}", e))
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, VyapaarError> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), VyapaarError> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.insert(key.to_string(), value.to_string());
        *self.writes.write().map_err(lock_error)? += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), VyapaarError> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, VyapaarError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), VyapaarError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), VyapaarError> {
        (**self).remove(key)
    }
}
