//! Document repository
//!
//! Maps the whole `AppData` document to a single stored entry. Every save
//! rewrites the entire document; there are no partial updates.

use crate::error::{VyapaarError, VyapaarResult};
use crate::models::AppData;

use super::kv::KeyValueStore;

/// Key under which the document is stored
pub const DOCUMENT_KEY: &str = "vyapaar_track_data_v1";

/// Key receiving an unreadable document before it is replaced
pub const CORRUPT_DOCUMENT_KEY: &str = "vyapaar_track_data_v1.corrupt";

/// Repository for the application document
pub struct DocumentRepository<S> {
    store: S,
}

impl<S: KeyValueStore> DocumentRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Check whether a document has been stored
    pub fn exists(&self) -> VyapaarResult<bool> {
        Ok(self.store.get(DOCUMENT_KEY)?.is_some())
    }

    /// Load the stored document, seeding (and saving) it if absent
    ///
    /// # Errors
    ///
    /// Returns `CorruptState` if a stored document cannot be parsed.
    pub fn load_strict(&self) -> VyapaarResult<AppData> {
        match self.store.get(DOCUMENT_KEY)? {
            Some(raw) => parse_document(&raw),
            None => self.seed(),
        }
    }

    /// Load the stored document, failing closed to the seed document
    ///
    /// An unreadable document is kept under [`CORRUPT_DOCUMENT_KEY`] and
    /// replaced by a freshly seeded one.
    pub fn load(&self) -> VyapaarResult<AppData> {
        let raw = match self.store.get(DOCUMENT_KEY)? {
            Some(raw) => raw,
            None => return self.seed(),
        };

        match parse_document(&raw) {
            Ok(data) => Ok(data),
            Err(err) => {
                log::warn!("{}; restoring default data", err);
                self.store.set(CORRUPT_DOCUMENT_KEY, &raw)?;
                self.seed()
            }
        }
    }

    /// Serialize and overwrite the stored document
    pub fn save(&self, data: &AppData) -> VyapaarResult<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.store.set(DOCUMENT_KEY, &json)?;
        log::debug!(
            "Saved document: {} expenses, {} business units, {} categories",
            data.expenses.len(),
            data.business_units.len(),
            data.categories.len()
        );
        Ok(())
    }

    /// Remove the stored document; the next load seeds a new one
    pub fn clear(&self) -> VyapaarResult<()> {
        self.store.remove(DOCUMENT_KEY)?;
        log::info!("Cleared stored document");
        Ok(())
    }

    fn seed(&self) -> VyapaarResult<AppData> {
        log::info!("No stored document found; seeding default data");
        let data = AppData::seed();
        self.save(&data)?;
        Ok(data)
    }
}

fn parse_document(raw: &str) -> VyapaarResult<AppData> {
    serde_json::from_str(raw).map_err(|e| VyapaarError::CorruptState {
        key: DOCUMENT_KEY.to_string(),
        reason: e.to_string(),
    })
}
