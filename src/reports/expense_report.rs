//! Expense report
//!
//! Filters the ledger by business unit and month and totals the result.
//! The filtered set is what the CSV export writes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{VyapaarError, VyapaarResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::services::{BulkOutcome, ExpenseLedger};

use super::selection::{BulkAction, Selection};

/// Business unit filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BusinessFilter {
    #[default]
    All,
    Unit(String),
}

impl BusinessFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Unit(unit) => &expense.business_unit == unit,
        }
    }
}

impl From<&str> for BusinessFilter {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Unit(s.to_string())
        }
    }
}

impl fmt::Display for BusinessFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All Units"),
            Self::Unit(unit) => write!(f, "{}", unit),
        }
    }
}

/// Month filter on the expense date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    /// `YYYY-MM`
    Month(String),
}

impl MonthFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Month(month) => &expense.month_key() == month,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = VyapaarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(|d| Self::Month(d.format("%Y-%m").to_string()))
            .map_err(|_| VyapaarError::Validation(format!("Invalid month '{}', use YYYY-MM", s)))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All Time"),
            Self::Month(month) => write!(f, "{}", month),
        }
    }
}

/// Distinct `YYYY-MM` values of all expense dates, newest first
pub fn available_months(expenses: &[Expense]) -> Vec<String> {
    let months: BTreeSet<String> = expenses.iter().map(|e| e.month_key()).collect();
    months.into_iter().rev().collect()
}

/// Filter state and selection of the reports view
#[derive(Debug, Default)]
pub struct ReportView {
    business: BusinessFilter,
    month: MonthFilter,
    selection: Selection,
}

impl ReportView {
    pub fn new(business: BusinessFilter, month: MonthFilter) -> Self {
        Self {
            business,
            month,
            selection: Selection::new(),
        }
    }

    pub fn business(&self) -> &BusinessFilter {
        &self.business
    }

    pub fn month(&self) -> &MonthFilter {
        &self.month
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_business(&mut self, business: BusinessFilter) {
        self.business = business;
        self.selection.clear();
    }

    pub fn set_month(&mut self, month: MonthFilter) {
        self.month = month;
        self.selection.clear();
    }

    /// Expenses matching both filters, in ledger order
    pub fn filtered<'e>(&self, expenses: &'e [Expense]) -> Vec<&'e Expense> {
        expenses
            .iter()
            .filter(|e| self.business.matches(e) && self.month.matches(e))
            .collect()
    }

    /// Sum of the filtered amounts regardless of status
    pub fn total(&self, expenses: &[Expense]) -> Money {
        self.filtered(expenses).into_iter().map(|e| e.amount).sum()
    }

    pub fn toggle(&mut self, id: &ExpenseId) -> bool {
        self.selection.toggle(id)
    }

    pub fn toggle_all(&mut self, expenses: &[Expense]) {
        let visible: Vec<ExpenseId> = self
            .filtered(expenses)
            .iter()
            .map(|e| e.id.clone())
            .collect();
        self.selection.toggle_all(&visible);
    }

    /// Apply a bulk action to the selection and clear it
    pub fn commit(
        &mut self,
        ledger: &mut ExpenseLedger<'_>,
        action: BulkAction,
    ) -> VyapaarResult<BulkOutcome> {
        let outcome = action.apply(ledger, &self.selection.ids())?;
        self.selection.clear();
        Ok(outcome)
    }
}
