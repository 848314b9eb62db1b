//! Multi-select state shared by the review queue and the reports view

use std::collections::HashSet;
use std::fmt;

use crate::error::VyapaarResult;
use crate::models::{ExpenseId, ExpenseStatus};
use crate::services::{BulkOutcome, ExpenseLedger};

/// A set of selected expense ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<ExpenseId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id; returns whether it is now selected
    pub fn toggle(&mut self, id: &ExpenseId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Select every visible id, or clear when they are already all selected
    pub fn toggle_all(&mut self, visible: &[ExpenseId]) {
        let visible: HashSet<ExpenseId> = visible.iter().cloned().collect();
        if self.ids == visible {
            self.ids.clear();
        } else {
            self.ids = visible;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &ExpenseId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Selected ids in a stable order
    pub fn ids(&self) -> Vec<ExpenseId> {
        let mut ids: Vec<ExpenseId> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}

/// An action applied to every selected expense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Approve,
    Reject,
    Delete,
}

impl BulkAction {
    /// Apply to the ledger; an empty id list changes nothing
    pub fn apply(
        self,
        ledger: &mut ExpenseLedger<'_>,
        ids: &[ExpenseId],
    ) -> VyapaarResult<BulkOutcome> {
        if ids.is_empty() {
            return Ok(BulkOutcome::default());
        }

        match self {
            Self::Approve => ledger.bulk_change_status(ids, ExpenseStatus::Approved),
            Self::Reject => ledger.bulk_change_status(ids, ExpenseStatus::Rejected),
            Self::Delete => ledger.bulk_delete(ids),
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approved"),
            Self::Reject => write!(f, "rejected"),
            Self::Delete => write!(f, "deleted"),
        }
    }
}
