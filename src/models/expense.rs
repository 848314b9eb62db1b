//! Expense model
//!
//! An expense is one submitted financial record moving through review:
//! it starts as `Pending Review` and is approved or rejected by an admin.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{ExpenseId, UserId};
use super::money::Money;

/// Review status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExpenseStatus {
    /// Awaiting an admin decision
    #[default]
    #[serde(rename = "Pending Review")]
    PendingReview,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingReview => "Pending Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "UPI (PhonePe/GPay)")]
    Upi,
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Card,
    Other,
}

impl PaymentMethod {
    /// All payment methods in display order
    pub fn all() -> &'static [PaymentMethod] {
        &[
            Self::Upi,
            Self::Cash,
            Self::BankTransfer,
            Self::Card,
            Self::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upi => "UPI (PhonePe/GPay)",
            Self::Cash => "Cash",
            Self::BankTransfer => "Bank Transfer",
            Self::Card => "Card",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    /// Accepts the full label or a short form (`upi`, `cash`, `bank`, `card`, `other`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "upi" | "upi (phonepe/gpay)" | "phonepe" | "gpay" => Ok(Self::Upi),
            "cash" => Ok(Self::Cash),
            "bank" | "bank transfer" | "bank-transfer" | "neft" | "imps" => Ok(Self::BankTransfer),
            "card" => Ok(Self::Card),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Unknown payment method '{}'. Expected one of: upi, cash, bank, card, other",
                s
            )),
        }
    }
}

/// Visual evidence attached to an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    /// Image embedded as a `data:` URL
    Inline(String),
    /// Image hosted elsewhere
    Url(String),
}

/// Who submitted an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub id: UserId,
    pub name: String,
}

/// A submitted expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExpenseRecord", into = "ExpenseRecord")]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub amount: Money,
    pub merchant: String,
    pub business_unit: String,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub reference_number: Option<String>,
    pub receipt: Option<Receipt>,
    pub status: ExpenseStatus,
    pub submitted_by: Submitter,
    pub submitted_at: DateTime<Utc>,
    pub review_note: Option<String>,
}

impl Expense {
    pub fn is_pending(&self) -> bool {
        self.status == ExpenseStatus::PendingReview
    }

    pub fn is_approved(&self) -> bool {
        self.status == ExpenseStatus::Approved
    }

    /// `YYYY-MM` of the expense date
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Check field-level rules shared by submission and editing
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(
            self.amount,
            &self.merchant,
            &self.business_unit,
            &self.category,
        )
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date.format("%Y-%m-%d"),
            self.merchant,
            self.amount,
            self.status
        )
    }
}

/// Field values for a new submission
///
/// Identity, timestamps and status are assigned by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub amount: Money,
    pub merchant: String,
    pub business_unit: String,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub reference_number: Option<String>,
    pub receipt: Option<Receipt>,
}

impl ExpenseDraft {
    /// Blank draft pre-filled the way the entry form starts: today's date,
    /// the first business unit and category, UPI payment, zero amount
    pub fn new(date: NaiveDate, business_units: &[String], categories: &[String]) -> Self {
        Self {
            date,
            amount: Money::zero(),
            merchant: String::new(),
            business_unit: business_units.first().cloned().unwrap_or_default(),
            category: categories.first().cloned().unwrap_or_default(),
            payment_method: PaymentMethod::Upi,
            description: String::new(),
            reference_number: None,
            receipt: None,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(
            self.amount,
            &self.merchant,
            &self.business_unit,
            &self.category,
        )
    }
}

fn validate_fields(
    amount: Money,
    merchant: &str,
    business_unit: &str,
    category: &str,
) -> Result<(), ExpenseValidationError> {
    if amount.is_negative() {
        return Err(ExpenseValidationError::NegativeAmount(amount));
    }
    if merchant.trim().is_empty() {
        return Err(ExpenseValidationError::MissingField("merchant"));
    }
    if business_unit.trim().is_empty() {
        return Err(ExpenseValidationError::MissingField("business unit"));
    }
    if category.trim().is_empty() {
        return Err(ExpenseValidationError::MissingField("category"));
    }
    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    MissingField(&'static str),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative (got {})", amount)
            }
            Self::MissingField(field) => write!(f, "The {} field is required", field),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// On-disk shape of an expense in the persisted JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseRecord {
    id: ExpenseId,
    date: NaiveDate,
    amount: Money,
    merchant: String,
    business_unit: String,
    category: String,
    payment_method: PaymentMethod,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receipt_base64: Option<String>,
    status: ExpenseStatus,
    submitted_by: String,
    submitted_by_id: UserId,
    submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review_note: Option<String>,
}

impl From<ExpenseRecord> for Expense {
    fn from(record: ExpenseRecord) -> Self {
        // An inline image wins when both are present
        let receipt = match (record.receipt_base64, record.receipt_url) {
            (Some(data), _) if !data.is_empty() => Some(Receipt::Inline(data)),
            (_, Some(url)) if !url.is_empty() => Some(Receipt::Url(url)),
            _ => None,
        };

        Self {
            id: record.id,
            date: record.date,
            amount: record.amount,
            merchant: record.merchant,
            business_unit: record.business_unit,
            category: record.category,
            payment_method: record.payment_method,
            description: record.description,
            reference_number: record.reference_number.filter(|r| !r.is_empty()),
            receipt,
            status: record.status,
            submitted_by: Submitter {
                id: record.submitted_by_id,
                name: record.submitted_by,
            },
            submitted_at: record.submitted_at,
            review_note: record.review_note,
        }
    }
}

impl From<Expense> for ExpenseRecord {
    fn from(expense: Expense) -> Self {
        let (receipt_base64, receipt_url) = match expense.receipt {
            Some(Receipt::Inline(data)) => (Some(data), None),
            Some(Receipt::Url(url)) => (None, Some(url)),
            None => (None, None),
        };

        Self {
            id: expense.id,
            date: expense.date,
            amount: expense.amount,
            merchant: expense.merchant,
            business_unit: expense.business_unit,
            category: expense.category,
            payment_method: expense.payment_method,
            description: expense.description,
            reference_number: expense.reference_number,
            receipt_url,
            receipt_base64,
            status: expense.status,
            submitted_by: expense.submitted_by.name,
            submitted_by_id: expense.submitted_by.id,
            submitted_at: expense.submitted_at,
            review_note: expense.review_note,
        }
    }
}
