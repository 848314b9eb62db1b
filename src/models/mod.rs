//! Core data models for VyapaarTrack
//!
//! This module contains the data structures of the expense domain:
//! expenses and their statuses, money, users, and the persisted document.

pub mod app_data;
pub mod expense;
pub mod ids;
pub mod money;
pub mod user;

pub use app_data::{AppData, Taxonomy, DEFAULT_BUSINESS_UNITS, DEFAULT_CATEGORIES};
pub use expense::{
    Expense, ExpenseDraft, ExpenseStatus, ExpenseValidationError, PaymentMethod, Receipt,
    Submitter,
};
pub use ids::{ExpenseId, UserId};
pub use money::{Money, MoneyParseError};
pub use user::{User, UserRole};
