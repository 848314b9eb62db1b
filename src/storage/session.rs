//! Session repository
//!
//! Stores the logged-in user under its own key, separate from the document.

use crate::error::VyapaarResult;
use crate::models::User;

use super::kv::KeyValueStore;

/// Key under which the current user is stored
pub const SESSION_KEY: &str = "vt_user";

/// Repository for the current session
pub struct SessionRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SessionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored user, if any. An unreadable entry is discarded.
    pub fn load(&self) -> VyapaarResult<Option<User>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("Discarding unreadable session: {}", e);
                self.store.remove(SESSION_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, user: &User) -> VyapaarResult<()> {
        let json = serde_json::to_string(user)?;
        self.store.set(SESSION_KEY, &json)
    }

    pub fn clear(&self) -> VyapaarResult<()> {
        self.store.remove(SESSION_KEY)
    }
}
