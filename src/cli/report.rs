//! Report and dashboard CLI commands
//!
//! Filtered expense reports, CSV export, bulk actions over the filtered
//! set, and the dashboard summary.

use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_dashboard, format_expense_report, format_month_list};
use crate::error::{VyapaarError, VyapaarResult};
use crate::export::{export_expenses_csv, export_filename};
use crate::models::Expense;
use crate::reports::{
    available_months, BulkAction, BusinessFilter, DashboardSummary, MonthFilter, ReportView,
};
use crate::services::{ExpenseLedger, SessionContext, View};
use crate::storage::Storage;

use super::prompt::confirm;
use super::resolve_ids;

/// Filters shared by the report subcommands
#[derive(Args, Clone)]
pub struct ReportFilterArgs {
    /// Business unit ("All" for every unit)
    #[arg(short, long, default_value = "All")]
    pub business: String,
    /// Month as YYYY-MM ("All" for every month)
    #[arg(short, long, default_value = "All")]
    pub month: String,
}

impl ReportFilterArgs {
    fn view(&self) -> VyapaarResult<ReportView> {
        let month: MonthFilter = self.month.parse()?;
        Ok(ReportView::new(
            BusinessFilter::from(self.business.as_str()),
            month,
        ))
    }
}

/// Bulk action on the filtered set
#[derive(Clone, Copy, ValueEnum)]
pub enum ReportAction {
    Approve,
    Reject,
    Delete,
}

impl From<ReportAction> for BulkAction {
    fn from(action: ReportAction) -> Self {
        match action {
            ReportAction::Approve => BulkAction::Approve,
            ReportAction::Reject => BulkAction::Reject,
            ReportAction::Delete => BulkAction::Delete,
        }
    }
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Show the filtered expense report
    Show {
        #[command(flatten)]
        filter: ReportFilterArgs,
    },

    /// List months that have expenses, newest first
    Months,

    /// Export the filtered expenses to CSV
    Export {
        #[command(flatten)]
        filter: ReportFilterArgs,
        /// Output file (default: exports/expenses_export_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply an action to selected expenses within the filtered set
    Apply {
        /// Action to apply
        #[arg(value_enum)]
        action: ReportAction,
        /// Expense IDs (or unique prefixes)
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,
        /// Select every expense in the filtered set
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        #[command(flatten)]
        filter: ReportFilterArgs,
        /// Skip confirmation prompt for deletes
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> VyapaarResult<()> {
    let session = SessionContext::restore(storage)?;
    session.authorize(View::Reports)?;
    let mut ledger = ExpenseLedger::open(storage)?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Show { filter } => {
            let view = filter.view()?;
            print!("{}", format_expense_report(&view, ledger.expenses(), symbol));
        }

        ReportCommands::Months => {
            print!("{}", format_month_list(&available_months(ledger.expenses())));
        }

        ReportCommands::Export { filter, output } => {
            let view = filter.view()?;
            let path = output.unwrap_or_else(|| {
                storage
                    .paths()
                    .export_dir()
                    .join(export_filename(Local::now().date_naive()))
            });

            let rows: Vec<&Expense> = view.filtered(ledger.expenses());
            let count = export_expenses_csv(&rows, &path)?;
            println!("Exported {} expense(s) to {}", count, path.display());
        }

        ReportCommands::Apply {
            action,
            ids,
            all,
            filter,
            yes,
        } => {
            let mut view = filter.view()?;
            let action = BulkAction::from(action);

            if all {
                view.toggle_all(ledger.expenses());
            } else {
                let visible: Vec<_> = view
                    .filtered(ledger.expenses())
                    .iter()
                    .map(|e| e.id.clone())
                    .collect();
                for id in resolve_ids(&ledger, &ids)? {
                    if !visible.contains(&id) {
                        return Err(VyapaarError::Validation(format!(
                            "Expense {} is not in the filtered report",
                            id
                        )));
                    }
                    if !view.selection().contains(&id) {
                        view.toggle(&id);
                    }
                }
            }

            let count = view.selection().len();
            if count == 0 {
                println!("Nothing selected.");
                return Ok(());
            }
            if action == BulkAction::Delete
                && !confirm(&format!("Delete {} expense(s) permanently?", count), yes)?
            {
                println!("Cancelled.");
                return Ok(());
            }

            let outcome = view.commit(&mut ledger, action)?;
            println!("{} expense(s) {}.", outcome.applied, action);
        }
    }

    Ok(())
}

/// Show the dashboard
pub fn handle_dashboard_command(storage: &Storage, settings: &Settings) -> VyapaarResult<()> {
    let session = SessionContext::restore(storage)?;
    session.authorize(View::Dashboard)?;
    let ledger = ExpenseLedger::open(storage)?;

    let summary = DashboardSummary::generate(ledger.expenses(), settings.recent_activity_count);
    print!("{}", format_dashboard(&summary, &settings.currency_symbol));
    Ok(())
}
