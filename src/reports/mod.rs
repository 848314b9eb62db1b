//! Reports module for VyapaarTrack
//!
//! Read-only projections of the ledger: the dashboard, the review queue and
//! the filtered expense report, plus the selection state used for bulk
//! actions.

pub mod dashboard;
pub mod expense_report;
pub mod review_queue;
pub mod selection;

pub use dashboard::{DashboardSummary, UnitTotal};
pub use expense_report::{available_months, BusinessFilter, MonthFilter, ReportView};
pub use review_queue::{pending, ReviewQueue};
pub use selection::{BulkAction, Selection};
