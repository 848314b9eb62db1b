//! Storage layer for VyapaarTrack
//!
//! A local key-value store holds two entries: the application document and
//! the current session. Values are JSON strings written atomically.

pub mod document;
pub mod file_io;
pub mod init;
pub mod kv;
pub mod session;

pub use document::{DocumentRepository, CORRUPT_DOCUMENT_KEY, DOCUMENT_KEY};
pub use file_io::{read_text, write_text_atomic};
pub use init::initialize_storage;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session::{SessionRepository, SESSION_KEY};

use crate::config::paths::VyapaarPaths;
use crate::error::VyapaarError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: VyapaarPaths,
    store: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Create a file-backed Storage instance
    pub fn new(paths: VyapaarPaths) -> Result<Self, VyapaarError> {
        paths.ensure_directories()?;

        Ok(Self {
            store: Box::new(FileStore::new(paths.data_dir())),
            paths,
        })
    }

    /// Create a Storage instance that keeps everything in memory
    pub fn in_memory(paths: VyapaarPaths) -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            paths,
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &VyapaarPaths {
        &self.paths
    }

    /// Repository for the application document
    pub fn documents(&self) -> DocumentRepository<&dyn KeyValueStore> {
        DocumentRepository::new(self.store.as_ref())
    }

    /// Repository for the current session
    pub fn sessions(&self) -> SessionRepository<&dyn KeyValueStore> {
        SessionRepository::new(self.store.as_ref())
    }
}
