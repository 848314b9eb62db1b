//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod prompt;
pub mod report;
pub mod review;
pub mod session;
pub mod settings;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_dashboard_command, handle_report_command, ReportCommands};
pub use review::{handle_review_command, ReviewCommands};
pub use session::{handle_session_command, SessionCommands};
pub use settings::{handle_settings_command, SettingsCommands};

use chrono::NaiveDate;

use crate::error::{VyapaarError, VyapaarResult};
use crate::models::{ExpenseId, Money};
use crate::services::ExpenseLedger;

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(value: &str) -> VyapaarResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        VyapaarError::Validation(format!("Invalid date '{}', use YYYY-MM-DD", value))
    })
}

/// Parse an amount argument such as `450`, `1,250.50` or `₹99`
pub(crate) fn parse_amount(value: &str) -> VyapaarResult<Money> {
    Money::parse(value)
        .map_err(|e| VyapaarError::Validation(format!("Invalid amount: {}", e)))
}

/// Resolve every identifier to a full expense id
pub(crate) fn resolve_ids(
    ledger: &ExpenseLedger<'_>,
    identifiers: &[String],
) -> VyapaarResult<Vec<ExpenseId>> {
    identifiers
        .iter()
        .map(|identifier| ledger.resolve(identifier).map(|e| e.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("29/02/2024").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50").unwrap(), Money::from_paise(125050));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
    }
}
