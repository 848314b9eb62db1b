//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::VyapaarPaths;
use crate::error::VyapaarError;

use super::document::DocumentRepository;
use super::kv::FileStore;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and writes the seed document unless one
/// already exists. Returns whether a new document was written.
pub fn initialize_storage(paths: &VyapaarPaths) -> Result<bool, VyapaarError> {
    paths.ensure_directories()?;

    let documents = DocumentRepository::new(FileStore::new(paths.data_dir()));
    if documents.exists()? {
        return Ok(false);
    }

    documents.load()?;
    Ok(true)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &VyapaarPaths) -> bool {
    !FileStore::new(paths.data_dir())
        .path_for(super::document::DOCUMENT_KEY)
        .exists()
}
