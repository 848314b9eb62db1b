//! Review queue
//!
//! The pending subset of the ledger plus the select-mode state used for
//! bulk review.

use crate::error::VyapaarResult;
use crate::models::{Expense, ExpenseId};
use crate::services::{BulkOutcome, ExpenseLedger};

use super::selection::{BulkAction, Selection};

/// Pending expenses in ledger order
pub fn pending(expenses: &[Expense]) -> Vec<&Expense> {
    expenses.iter().filter(|e| e.is_pending()).collect()
}

/// Select-mode and selection state of the queue
#[derive(Debug, Default)]
pub struct ReviewQueue {
    select_mode: bool,
    selection: Selection,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_select_mode(&self) -> bool {
        self.select_mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Enter or leave select mode; either way the selection starts empty
    pub fn toggle_select_mode(&mut self) {
        self.select_mode = !self.select_mode;
        self.selection.clear();
    }

    /// Flip one id; ignored outside select mode
    pub fn toggle(&mut self, id: &ExpenseId) -> bool {
        self.select_mode && self.selection.toggle(id)
    }

    /// Select every pending expense, or clear if all are selected
    pub fn toggle_all(&mut self, expenses: &[Expense]) {
        if !self.select_mode {
            return;
        }
        let visible: Vec<ExpenseId> = pending(expenses).iter().map(|e| e.id.clone()).collect();
        self.selection.toggle_all(&visible);
    }

    /// Apply a bulk action to the selection and leave select mode
    ///
    /// An empty selection is a no-op and leaves the mode unchanged.
    pub fn commit(
        &mut self,
        ledger: &mut ExpenseLedger<'_>,
        action: BulkAction,
    ) -> VyapaarResult<BulkOutcome> {
        if self.selection.is_empty() {
            return Ok(BulkOutcome::default());
        }

        let outcome = action.apply(ledger, &self.selection.ids())?;
        self.selection.clear();
        self.select_mode = false;
        Ok(outcome)
    }
}
