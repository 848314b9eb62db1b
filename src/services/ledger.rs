//! Expense ledger
//!
//! Owns the authoritative, most-recent-first list of expenses and applies
//! submissions, edits, status changes and deletions. Every successful
//! mutation is followed by a full save of the document.

use std::collections::HashSet;

use chrono::Utc;

use crate::error::{VyapaarError, VyapaarResult};
use crate::models::{
    AppData, Expense, ExpenseDraft, ExpenseId, ExpenseStatus, Submitter, Taxonomy,
};
use crate::storage::Storage;

/// Result of a bulk operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Number of expenses the operation applied to
    pub applied: usize,
    /// Requested ids that were not in the ledger
    pub missing: Vec<ExpenseId>,
}

/// The in-memory document plus its persistence
pub struct ExpenseLedger<'a> {
    storage: &'a Storage,
    data: AppData,
}

impl<'a> ExpenseLedger<'a> {
    /// Load the document (seeding it on first run)
    pub fn open(storage: &'a Storage) -> VyapaarResult<Self> {
        let data = storage.documents().load()?;
        log::debug!("Opened ledger with {} expenses", data.expenses.len());
        Ok(Self { storage, data })
    }

    pub fn document(&self) -> &AppData {
        &self.data
    }

    /// All expenses, most recent first
    pub fn expenses(&self) -> &[Expense] {
        &self.data.expenses
    }

    pub fn taxonomy(&self) -> Taxonomy<'_> {
        self.data.taxonomy()
    }

    /// Get an expense by exact id
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.data.expenses.iter().find(|e| &e.id == id)
    }

    /// Find an expense by exact id or by an unambiguous id prefix
    pub fn resolve(&self, identifier: &str) -> VyapaarResult<&Expense> {
        let identifier = identifier.trim();
        if let Some(expense) = self.data.expenses.iter().find(|e| e.id.as_str() == identifier) {
            return Ok(expense);
        }

        let mut matches = self
            .data
            .expenses
            .iter()
            .filter(|e| !identifier.is_empty() && e.id.as_str().starts_with(identifier));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense),
            (Some(_), Some(_)) => Err(VyapaarError::Validation(format!(
                "Expense id prefix '{}' is ambiguous",
                identifier
            ))),
            _ => Err(VyapaarError::expense_not_found(identifier)),
        }
    }

    /// Submit a new expense
    ///
    /// The expense always starts as `Pending Review`, receives a fresh id
    /// and submission time, and is placed first in the list.
    pub fn submit(&mut self, mut draft: ExpenseDraft, submitter: Submitter) -> VyapaarResult<Expense> {
        normalize(&mut draft.merchant);
        normalize(&mut draft.business_unit);
        normalize(&mut draft.category);
        draft
            .validate()
            .map_err(|e| VyapaarError::Validation(e.to_string()))?;
        self.warn_outside_taxonomy(&draft.business_unit, &draft.category);

        let expense = Expense {
            id: ExpenseId::new(),
            date: draft.date,
            amount: draft.amount,
            merchant: draft.merchant,
            business_unit: draft.business_unit,
            category: draft.category,
            payment_method: draft.payment_method,
            description: draft.description,
            reference_number: draft.reference_number.filter(|r| !r.trim().is_empty()),
            receipt: draft.receipt,
            status: ExpenseStatus::PendingReview,
            submitted_by: submitter,
            submitted_at: Utc::now(),
            review_note: None,
        };

        self.data.expenses.insert(0, expense.clone());
        self.persist()?;

        log::info!(
            "Submitted expense {} ({} at {}) by {}",
            expense.id,
            expense.amount,
            expense.merchant,
            expense.submitted_by.name
        );
        Ok(expense)
    }

    /// Set the status of one expense, leaving every other field untouched
    pub fn change_status(&mut self, id: &ExpenseId, status: ExpenseStatus) -> VyapaarResult<()> {
        self.review(id, status, None)
    }

    /// Set the status of one expense and optionally attach a review note
    pub fn review(
        &mut self,
        id: &ExpenseId,
        status: ExpenseStatus,
        note: Option<String>,
    ) -> VyapaarResult<()> {
        let expense = self
            .data
            .expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| VyapaarError::expense_not_found(id.as_str()))?;

        expense.status = status;
        if let Some(note) = note {
            expense.review_note = Some(note).filter(|n| !n.trim().is_empty());
        }
        self.persist()?;

        log::info!("Expense {} marked {}", id, status);
        Ok(())
    }

    /// Set the status of every listed expense; unknown ids are ignored
    pub fn bulk_change_status(
        &mut self,
        ids: &[ExpenseId],
        status: ExpenseStatus,
    ) -> VyapaarResult<BulkOutcome> {
        let wanted: HashSet<&ExpenseId> = ids.iter().collect();
        let mut applied = 0;

        for expense in self.data.expenses.iter_mut() {
            if wanted.contains(&expense.id) {
                expense.status = status;
                applied += 1;
            }
        }

        let outcome = BulkOutcome {
            applied,
            missing: self.missing_from(&wanted),
        };
        if applied > 0 {
            self.persist()?;
        }

        log::info!("Bulk marked {} expenses {}", applied, status);
        Ok(outcome)
    }

    /// Replace the stored record with the same id as `updated`
    pub fn edit(&mut self, mut updated: Expense) -> VyapaarResult<()> {
        normalize(&mut updated.merchant);
        normalize(&mut updated.business_unit);
        normalize(&mut updated.category);
        updated
            .validate()
            .map_err(|e| VyapaarError::Validation(e.to_string()))?;

        let position = self
            .data
            .expenses
            .iter()
            .position(|e| e.id == updated.id)
            .ok_or_else(|| VyapaarError::expense_not_found(updated.id.as_str()))?;

        self.warn_outside_taxonomy(&updated.business_unit, &updated.category);
        let id = updated.id.clone();
        self.data.expenses[position] = updated;
        self.persist()?;

        log::info!("Edited expense {}", id);
        Ok(())
    }

    /// Remove one expense permanently
    pub fn delete(&mut self, id: &ExpenseId) -> VyapaarResult<Expense> {
        let position = self
            .data
            .expenses
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| VyapaarError::expense_not_found(id.as_str()))?;

        let removed = self.data.expenses.remove(position);
        self.persist()?;

        log::info!("Deleted expense {}", id);
        Ok(removed)
    }

    /// Remove every listed expense permanently; unknown ids are ignored
    pub fn bulk_delete(&mut self, ids: &[ExpenseId]) -> VyapaarResult<BulkOutcome> {
        let wanted: HashSet<&ExpenseId> = ids.iter().collect();
        let missing = self.missing_from(&wanted);

        let before = self.data.expenses.len();
        self.data.expenses.retain(|e| !wanted.contains(&e.id));
        let applied = before - self.data.expenses.len();

        if applied > 0 {
            self.persist()?;
        }

        log::info!("Bulk deleted {} expenses", applied);
        Ok(BulkOutcome { applied, missing })
    }

    /// Mutable access for taxonomy administration; callers must `persist`
    pub(crate) fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    /// Write the whole document
    pub(crate) fn persist(&self) -> VyapaarResult<()> {
        self.storage.documents().save(&self.data)
    }

    fn missing_from(&self, wanted: &HashSet<&ExpenseId>) -> Vec<ExpenseId> {
        let mut missing: Vec<ExpenseId> = wanted
            .iter()
            .filter(|id| self.get(id).is_none())
            .map(|id| (*id).clone())
            .collect();
        missing.sort();
        missing
    }

    fn warn_outside_taxonomy(&self, business_unit: &str, category: &str) {
        let taxonomy = self.taxonomy();
        if !taxonomy.has_business_unit(business_unit) {
            log::warn!("Business unit '{}' is not in the configured list", business_unit);
        }
        if !taxonomy.has_category(category) {
            log::warn!("Category '{}' is not in the configured list", category);
        }
    }
}

/// Trim surrounding whitespace in place
fn normalize(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::VyapaarPaths;
    use crate::models::{Money, PaymentMethod, User};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn test_storage() -> Storage {
        Storage::in_memory(VyapaarPaths::with_base_dir(PathBuf::from("/nonexistent")))
    }

    fn draft(amount: i64, date: (i32, u32, u32)) -> ExpenseDraft {
        ExpenseDraft {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount: Money::from_rupees(amount),
            merchant: "Hardware Store".into(),
            business_unit: "Head Office".into(),
            category: "Materials".into(),
            payment_method: PaymentMethod::Cash,
            description: "Nails".into(),
            reference_number: None,
            receipt: None,
        }
    }

    fn staff() -> Submitter {
        User::find_builtin("u2").unwrap().as_submitter()
    }

    fn ids(values: &[&str]) -> Vec<ExpenseId> {
        values.iter().map(|v| ExpenseId::from(*v)).collect()
    }

    #[test]
    fn test_submit_prepends_pending_expense() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let expense = ledger.submit(draft(100, (2024, 1, 5)), staff()).unwrap();

        assert_eq!(ledger.expenses().len(), 4);
        assert_eq!(ledger.expenses()[0].id, expense.id);
        assert_eq!(ledger.expenses()[0].status, ExpenseStatus::PendingReview);
        assert_eq!(ledger.expenses()[0].amount, Money::from_rupees(100));
        assert_eq!(
            ledger.expenses()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert_eq!(ledger.expenses()[0].submitted_by.name, "Site Manager (Staff)");
    }

    #[test]
    fn test_submit_and_edit_trim_text_fields() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let mut padded = draft(100, (2024, 1, 5));
        padded.merchant = "  Gupta Hardware ".into();
        padded.business_unit = " College ".into();
        padded.category = "Materials\t".into();
        let expense = ledger.submit(padded, staff()).unwrap();
        assert_eq!(expense.merchant, "Gupta Hardware");
        assert_eq!(expense.business_unit, "College");
        assert_eq!(expense.category, "Materials");

        let mut updated = expense.clone();
        updated.merchant = " Sharma Stores ".into();
        updated.business_unit = " Brick Factory".into();
        updated.category = "Labor ".into();
        ledger.edit(updated).unwrap();

        let stored = ledger.get(&expense.id).unwrap();
        assert_eq!(stored.merchant, "Sharma Stores");
        assert_eq!(stored.business_unit, "Brick Factory");
        assert_eq!(stored.category, "Labor");
    }

    #[test]
    fn test_submit_assigns_unique_ids() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let mut seen = HashSet::new();
        for i in 0..5 {
            let before = ledger.expenses().len();
            let expense = ledger.submit(draft(10 + i, (2024, 1, 5)), staff()).unwrap();
            assert_eq!(ledger.expenses().len(), before + 1);
            assert!(seen.insert(expense.id));
        }
    }

    #[test]
    fn test_submit_persists_document() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();
        let expense = ledger.submit(draft(100, (2024, 1, 5)), staff()).unwrap();

        let reloaded = ExpenseLedger::open(&storage).unwrap();
        assert_eq!(reloaded.expenses()[0].id, expense.id);
    }

    #[test]
    fn test_submit_rejects_invalid_draft() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let mut bad = draft(100, (2024, 1, 5));
        bad.merchant = "  ".into();
        let err = ledger.submit(bad, staff()).unwrap_err();
        assert!(err.is_validation());

        let mut negative = draft(100, (2024, 1, 5));
        negative.amount = Money::from_paise(-500);
        assert!(ledger.submit(negative, staff()).unwrap_err().is_validation());

        assert_eq!(ledger.expenses().len(), 3);
    }

    #[test]
    fn test_change_status_only_touches_status() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();
        let id = ExpenseId::from("e2");
        let before = ledger.get(&id).unwrap().clone();

        ledger.change_status(&id, ExpenseStatus::Approved).unwrap();
        ledger.change_status(&id, ExpenseStatus::Approved).unwrap();

        let after = ledger.get(&id).unwrap();
        assert_eq!(after.status, ExpenseStatus::Approved);
        assert_eq!(after.amount, before.amount);
        assert_eq!(after.merchant, before.merchant);
        assert_eq!(after.submitted_at, before.submitted_at);
    }

    #[test]
    fn test_change_status_missing_id() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();
        let snapshot = ledger.document().clone();

        let err = ledger
            .change_status(&ExpenseId::from("nope"), ExpenseStatus::Rejected)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger.document(), &snapshot);
    }

    #[test]
    fn test_review_attaches_note() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();
        let id = ExpenseId::from("e3");

        ledger
            .review(&id, ExpenseStatus::Rejected, Some("Missing bill".into()))
            .unwrap();

        let expense = ledger.get(&id).unwrap();
        assert_eq!(expense.status, ExpenseStatus::Rejected);
        assert_eq!(expense.review_note.as_deref(), Some("Missing bill"));
    }

    #[test]
    fn test_bulk_change_status() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let outcome = ledger
            .bulk_change_status(&ids(&["e2", "e3", "ghost"]), ExpenseStatus::Approved)
            .unwrap();

        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.missing, ids(&["ghost"]));

        let approved: Vec<_> = ledger
            .expenses()
            .iter()
            .filter(|e| e.status == ExpenseStatus::Approved)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(approved, vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn test_edit_replaces_whole_record() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let mut updated = ledger.get(&ExpenseId::from("e2")).unwrap().clone();
        updated.amount = Money::from_rupees(500);
        updated.description = "Tea, snacks and water".into();
        ledger.edit(updated.clone()).unwrap();

        assert_eq!(ledger.get(&updated.id), Some(&updated));
        assert_eq!(ledger.expenses()[1].id.as_str(), "e2");
    }

    #[test]
    fn test_edit_missing_id() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let mut ghost = ledger.expenses()[0].clone();
        ghost.id = ExpenseId::from("ghost");
        assert!(ledger.edit(ghost).unwrap_err().is_not_found());
        assert_eq!(ledger.expenses().len(), 3);
    }

    #[test]
    fn test_delete() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let removed = ledger.delete(&ExpenseId::from("e1")).unwrap();
        assert_eq!(removed.merchant, "Shree Cement Traders");
        assert_eq!(ledger.expenses().len(), 2);
        assert!(ledger.delete(&ExpenseId::from("e1")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_bulk_delete_counts_present_ids() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();

        let outcome = ledger.bulk_delete(&ids(&["e1", "e3", "x", "y"])).unwrap();
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.missing.len(), 2);
        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.expenses()[0].id.as_str(), "e2");

        let reloaded = ExpenseLedger::open(&storage).unwrap();
        assert_eq!(reloaded.expenses().len(), 1);
    }

    #[test]
    fn test_resolve_by_prefix() {
        let storage = test_storage();
        let mut ledger = ExpenseLedger::open(&storage).unwrap();
        let expense = ledger.submit(draft(100, (2024, 1, 5)), staff()).unwrap();

        let prefix = &expense.id.as_str()[..8];
        assert_eq!(ledger.resolve(prefix).unwrap().id, expense.id);
        assert_eq!(ledger.resolve("e2").unwrap().merchant, "Local Tea Stall");
        assert!(ledger.resolve("e").is_err());
        assert!(ledger.resolve("zzz").unwrap_err().is_not_found());
    }
}
