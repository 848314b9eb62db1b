//! Session context
//!
//! Tracks who is logged in and which views their role may open. The session
//! starts empty, is filled by `login`, and is cleared by `logout`.

use std::fmt;

use crate::error::{VyapaarError, VyapaarResult};
use crate::models::{User, UserRole};
use crate::storage::Storage;

/// Role-gated areas of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    ReviewQueue,
    NewEntry,
    Reports,
    Settings,
}

impl View {
    pub fn all() -> &'static [View] {
        &[
            Self::Dashboard,
            Self::ReviewQueue,
            Self::NewEntry,
            Self::Reports,
            Self::Settings,
        ]
    }

    /// Roles allowed to open this view
    pub fn allowed_roles(&self) -> &'static [UserRole] {
        match self {
            Self::NewEntry => &[UserRole::Admin, UserRole::Staff],
            _ => &[UserRole::Admin],
        }
    }

    pub fn permits(&self, role: UserRole) -> bool {
        self.allowed_roles().contains(&role)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Dashboard => "Dashboard",
            Self::ReviewQueue => "Review Queue",
            Self::NewEntry => "New Entry",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
        };
        f.write_str(label)
    }
}

/// The current user, persisted separately from the document
pub struct SessionContext<'a> {
    storage: &'a Storage,
    user: Option<User>,
}

impl<'a> SessionContext<'a> {
    /// Restore the session saved by a previous login
    pub fn restore(storage: &'a Storage) -> VyapaarResult<Self> {
        let user = storage.sessions().load()?;
        Ok(Self { storage, user })
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Log in as one of the built-in users
    pub fn login(&mut self, user_id: &str) -> VyapaarResult<&User> {
        let user = User::find_builtin(user_id.trim())
            .ok_or_else(|| VyapaarError::user_not_found(user_id))?;

        self.storage.sessions().save(&user)?;
        log::info!("Logged in as {} ({})", user.name, user.role);
        Ok(&*self.user.insert(user))
    }

    pub fn logout(&mut self) -> VyapaarResult<()> {
        self.storage.sessions().clear()?;
        if let Some(user) = self.user.take() {
            log::info!("Logged out {}", user.name);
        }
        Ok(())
    }

    /// The current user, if their role may open `view`
    pub fn authorize(&self, view: View) -> VyapaarResult<&User> {
        let user = self.user.as_ref().ok_or(VyapaarError::Unauthenticated)?;

        if !view.permits(user.role) {
            return Err(VyapaarError::AccessDenied {
                role: user.role.to_string(),
                view: view.to_string(),
            });
        }
        Ok(user)
    }

    /// Views the current user may open
    pub fn available_views(&self) -> Vec<View> {
        match &self.user {
            Some(user) => View::all()
                .iter()
                .copied()
                .filter(|v| v.permits(user.role))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Where a user lands after login
    pub fn home_view(&self) -> Option<View> {
        self.user.as_ref().map(|u| match u.role {
            UserRole::Admin => View::Dashboard,
            UserRole::Staff => View::NewEntry,
        })
    }
}
