//! Users and roles
//!
//! There is no user store: login picks one of the built-in identities.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Submitter;
use super::ids::UserId;

/// Role selected at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
        }
    }
}

/// A logged-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Identity recorded on expenses this user submits
    pub fn as_submitter(&self) -> Submitter {
        Submitter {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// The identities offered at login
    pub fn builtin() -> Vec<User> {
        vec![
            User::new("u1", "Accountant (Admin)", UserRole::Admin),
            User::new("u2", "Site Manager (Staff)", UserRole::Staff),
        ]
    }

    /// Look up a built-in identity by id
    pub fn find_builtin(id: &str) -> Option<User> {
        Self::builtin().into_iter().find(|u| u.id.as_str() == id)
    }
}
