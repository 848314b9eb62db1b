//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, the dashboard and reports
//! as plain-text tables.

pub mod dashboard;
pub mod expense;
pub mod report;

pub use dashboard::format_dashboard;
pub use expense::{format_expense_details, format_expense_table, short_id};
pub use report::{format_expense_report, format_month_list};
