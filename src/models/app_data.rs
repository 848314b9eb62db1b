//! The application document
//!
//! `AppData` is the single persisted unit: every expense plus the two
//! configurable taxonomies. A fresh installation is seeded with sample rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::expense::{Expense, ExpenseStatus, PaymentMethod, Submitter};
use super::money::Money;

/// Default business units for a fresh document
pub const DEFAULT_BUSINESS_UNITS: &[&str] = &[
    "uPVC Manufacturing",
    "Brick Factory",
    "Construction Projects",
    "College",
    "School",
    "Head Office",
];

/// Default categories for a fresh document
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Materials",
    "Labor",
    "Fuel & Transport",
    "Utilities",
    "Maintenance",
    "Food & Refreshments",
    "Office Supplies",
    "Other",
];

/// Business units and categories offered for new entries
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy<'a> {
    pub business_units: &'a [String],
    pub categories: &'a [String],
}

impl Taxonomy<'_> {
    pub fn has_business_unit(&self, name: &str) -> bool {
        self.business_units.iter().any(|b| b == name)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}

/// The persisted document root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    /// Most recent first
    pub expenses: Vec<Expense>,
    pub business_units: Vec<String>,
    pub categories: Vec<String>,
}

impl AppData {
    /// Document written on first run
    pub fn seed() -> Self {
        Self {
            expenses: seed_expenses(),
            business_units: DEFAULT_BUSINESS_UNITS.iter().map(|s| s.to_string()).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn taxonomy(&self) -> Taxonomy<'_> {
        Taxonomy {
            business_units: &self.business_units,
            categories: &self.categories,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_row(
    id: &str,
    date: (i32, u32, u32),
    rupees: i64,
    merchant: &str,
    business_unit: &str,
    category: &str,
    payment_method: PaymentMethod,
    description: &str,
    status: ExpenseStatus,
    submitter: (&str, &str),
    submitted_at: &str,
) -> Option<Expense> {
    Some(Expense {
        id: id.into(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
        amount: Money::from_rupees(rupees),
        merchant: merchant.into(),
        business_unit: business_unit.into(),
        category: category.into(),
        payment_method,
        description: description.into(),
        reference_number: None,
        receipt: None,
        status,
        submitted_by: Submitter {
            id: submitter.0.into(),
            name: submitter.1.into(),
        },
        submitted_at: DateTime::parse_from_rfc3339(submitted_at)
            .ok()?
            .with_timezone(&Utc),
        review_note: None,
    })
}

fn seed_expenses() -> Vec<Expense> {
    [
        seed_row(
            "e1",
            (2023, 10, 25),
            12500,
            "Shree Cement Traders",
            "Construction Projects",
            "Materials",
            PaymentMethod::BankTransfer,
            "50 bags of cement for Site A",
            ExpenseStatus::Approved,
            ("u2", "Ramesh (Site Manager)"),
            "2023-10-25T10:30:00Z",
        ),
        seed_row(
            "e2",
            (2023, 10, 26),
            450,
            "Local Tea Stall",
            "Brick Factory",
            "Food & Refreshments",
            PaymentMethod::Cash,
            "Tea and snacks for laborers",
            ExpenseStatus::PendingReview,
            ("u3", "Suresh (Supervisor)"),
            "2023-10-26T14:15:00Z",
        ),
        seed_row(
            "e3",
            (2023, 10, 27),
            3200,
            "Indian Oil Pump",
            "uPVC Manufacturing",
            "Fuel & Transport",
            PaymentMethod::Upi,
            "Diesel for Generator",
            ExpenseStatus::PendingReview,
            ("u4", "Driver Mohan"),
            "2023-10-27T09:00:00Z",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_document() {
        let data = AppData::seed();
        assert_eq!(data.expenses.len(), 3);
        assert_eq!(data.business_units.len(), 6);
        assert_eq!(data.categories.len(), 8);
        assert_eq!(data.expenses[0].id.as_str(), "e1");
        assert_eq!(data.expenses[2].amount, Money::from_rupees(3200));
    }

    #[test]
    fn test_document_json_keys() {
        let value = serde_json::to_value(AppData::seed()).unwrap();
        assert!(value["expenses"].is_array());
        assert!(value["businessUnits"].is_array());
        assert_eq!(value["categories"][7], "Other");
    }

    #[test]
    fn test_taxonomy_membership() {
        let data = AppData::seed();
        let taxonomy = data.taxonomy();
        assert!(taxonomy.has_business_unit("Head Office"));
        assert!(!taxonomy.has_business_unit("head office"));
        assert!(taxonomy.has_category("Labor"));
    }
}
