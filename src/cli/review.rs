//! Review queue CLI commands
//!
//! Approve, reject or delete pending expenses one at a time or in bulk.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_expense_table;
use crate::error::{VyapaarError, VyapaarResult};
use crate::models::{ExpenseId, ExpenseStatus};
use crate::reports::{pending, BulkAction, ReviewQueue};
use crate::services::{BulkOutcome, ExpenseLedger, SessionContext, View};
use crate::storage::Storage;

use super::prompt::confirm;
use super::resolve_ids;

/// Review subcommands
#[derive(Subcommand)]
pub enum ReviewCommands {
    /// List expenses awaiting review
    List,

    /// Approve expenses
    Approve {
        /// Expense IDs (or unique prefixes)
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,
        /// Approve every pending expense
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        /// Review note (single expense only)
        #[arg(long)]
        note: Option<String>,
    },

    /// Reject expenses
    Reject {
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete expenses permanently
    Delete {
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a review command
pub fn handle_review_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReviewCommands,
) -> VyapaarResult<()> {
    let session = SessionContext::restore(storage)?;
    session.authorize(View::ReviewQueue)?;
    let mut ledger = ExpenseLedger::open(storage)?;

    match cmd {
        ReviewCommands::List => {
            let queue = pending(ledger.expenses());
            if queue.is_empty() {
                println!("All caught up! No pending expenses.");
            } else {
                println!("Review Queue ({} pending)", queue.len());
                println!(
                    "{}",
                    format_expense_table(&queue, &settings.currency_symbol)
                );
            }
        }

        ReviewCommands::Approve { ids, all, note } => {
            review(&mut ledger, &ids, all, ExpenseStatus::Approved, note)?;
        }

        ReviewCommands::Reject { ids, all, note } => {
            review(&mut ledger, &ids, all, ExpenseStatus::Rejected, note)?;
        }

        ReviewCommands::Delete { ids, all, yes } => {
            let mut queue = select(&ledger, &ids, all)?;
            let count = queue.selection().len();
            if count == 0 {
                println!("Nothing selected.");
                return Ok(());
            }
            if !confirm(
                &format!("Delete {} expense(s) permanently?", count),
                yes,
            )? {
                println!("Cancelled.");
                return Ok(());
            }
            let outcome = queue.commit(&mut ledger, BulkAction::Delete)?;
            report_outcome(&outcome, BulkAction::Delete);
        }
    }

    Ok(())
}

/// One id goes through a single review so a note can be attached;
/// several go through the queue's bulk path
fn review(
    ledger: &mut ExpenseLedger<'_>,
    identifiers: &[String],
    all: bool,
    status: ExpenseStatus,
    note: Option<String>,
) -> VyapaarResult<()> {
    if let ([identifier], false) = (identifiers, all) {
        let id = ledger.resolve(identifier)?.id.clone();
        ledger.review(&id, status, note)?;
        println!("Expense {} marked {}", id, status);
        return Ok(());
    }

    if note.is_some() {
        return Err(VyapaarError::Validation(
            "A review note can only be attached to a single expense".into(),
        ));
    }

    let action = match status {
        ExpenseStatus::Approved => BulkAction::Approve,
        _ => BulkAction::Reject,
    };
    let mut queue = select(ledger, identifiers, all)?;
    let outcome = queue.commit(ledger, action)?;
    report_outcome(&outcome, action);
    Ok(())
}

/// Build a queue in select mode holding the requested ids
fn select(
    ledger: &ExpenseLedger<'_>,
    identifiers: &[String],
    all: bool,
) -> VyapaarResult<ReviewQueue> {
    let mut queue = ReviewQueue::new();
    queue.toggle_select_mode();

    if all {
        queue.toggle_all(ledger.expenses());
    } else {
        let ids: Vec<ExpenseId> = resolve_ids(ledger, identifiers)?;
        for id in &ids {
            if !queue.selection().contains(id) {
                queue.toggle(id);
            }
        }
    }
    Ok(queue)
}

fn report_outcome(outcome: &BulkOutcome, action: BulkAction) {
    if outcome.applied == 0 {
        println!("No expenses {}.", action);
    } else {
        println!("{} expense(s) {}.", outcome.applied, action);
    }
    for id in &outcome.missing {
        println!("  skipped missing expense {}", id);
    }
}
