//! Expense CLI commands
//!
//! Submission (optionally pre-filled from a receipt image), listing,
//! inspection, editing and deletion of expenses.

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::VyapaarResult;
use crate::models::{Expense, ExpenseDraft, PaymentMethod, Receipt};
use crate::services::classify::{classifier_from_settings, prefill_draft, ReceiptImage};
use crate::services::{ExpenseLedger, SessionContext, View};
use crate::storage::Storage;

use super::prompt::confirm;
use super::{parse_amount, parse_date};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Submit a new expense for review
    Submit {
        /// Amount in rupees (e.g., "450" or "1,234.50")
        #[arg(short, long)]
        amount: Option<String>,
        /// Merchant or vendor name
        #[arg(short, long)]
        merchant: Option<String>,
        /// Expense date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Business unit (default: first configured unit)
        #[arg(short, long)]
        business: Option<String>,
        /// Category (default: first configured category)
        #[arg(short, long)]
        category: Option<String>,
        /// Payment method (upi, cash, bank, card, other)
        #[arg(short, long)]
        payment: Option<PaymentMethod>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// UPI or bank reference number
        #[arg(long)]
        reference: Option<String>,
        /// Receipt image to attach and auto-scan
        #[arg(long, conflicts_with = "receipt_url")]
        receipt: Option<PathBuf>,
        /// Link to a receipt hosted elsewhere
        #[arg(long)]
        receipt_url: Option<String>,
    },

    /// List all expenses, most recent first
    List {
        /// Show only the first N expenses
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show expense details
    Show {
        /// Expense ID (or unique prefix)
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (or unique prefix)
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        merchant: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        business: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        payment: Option<PaymentMethod>,
        #[arg(long)]
        description: Option<String>,
        /// New reference number (empty to clear)
        #[arg(long)]
        reference: Option<String>,
        /// Review note (empty to clear)
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete an expense permanently
    Delete {
        /// Expense ID (or unique prefix)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> VyapaarResult<()> {
    let session = SessionContext::restore(storage)?;
    let mut ledger = ExpenseLedger::open(storage)?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Submit {
            amount,
            merchant,
            date,
            business,
            category,
            payment,
            description,
            reference,
            receipt,
            receipt_url,
        } => {
            let user = session.authorize(View::NewEntry)?;
            let today = Local::now().date_naive();
            let taxonomy = ledger.taxonomy();
            let mut draft =
                ExpenseDraft::new(today, taxonomy.business_units, taxonomy.categories);

            if let Some(path) = receipt {
                let image = ReceiptImage::from_path(&path)?;
                let classifier = classifier_from_settings(settings, today);
                if let Some(advisory) =
                    prefill_draft(classifier.as_ref(), &image, taxonomy, &mut draft)
                {
                    eprintln!("{}", advisory);
                }
                draft.receipt = Some(image.to_receipt());
            }
            if let Some(url) = receipt_url {
                draft.receipt = Some(Receipt::Url(url));
            }

            if let Some(amount) = amount {
                draft.amount = parse_amount(&amount)?;
            }
            if let Some(merchant) = merchant {
                draft.merchant = merchant;
            }
            if let Some(date) = date {
                draft.date = parse_date(&date)?;
            }
            if let Some(business) = business {
                draft.business_unit = business;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(payment) = payment {
                draft.payment_method = payment;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(reference) = reference {
                draft.reference_number = Some(reference);
            }

            let expense = ledger.submit(draft, user.as_submitter())?;
            println!("Expense submitted for review.");
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::List { limit } => {
            session.authorize(View::Reports)?;
            let rows: Vec<&Expense> = ledger
                .expenses()
                .iter()
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            println!("{}", format_expense_table(&rows, symbol));
        }

        ExpenseCommands::Show { id } => {
            session.authorize(View::Reports)?;
            let expense = ledger.resolve(&id)?;
            print!("{}", format_expense_details(expense, symbol));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            merchant,
            date,
            business,
            category,
            payment,
            description,
            reference,
            note,
        } => {
            session.authorize(View::Reports)?;
            let mut expense = ledger.resolve(&id)?.clone();

            if let Some(amount) = amount {
                expense.amount = parse_amount(&amount)?;
            }
            if let Some(merchant) = merchant {
                expense.merchant = merchant;
            }
            if let Some(date) = date {
                expense.date = parse_date(&date)?;
            }
            if let Some(business) = business {
                expense.business_unit = business;
            }
            if let Some(category) = category {
                expense.category = category;
            }
            if let Some(payment) = payment {
                expense.payment_method = payment;
            }
            if let Some(description) = description {
                expense.description = description;
            }
            if let Some(reference) = reference {
                expense.reference_number = Some(reference).filter(|r| !r.trim().is_empty());
            }
            if let Some(note) = note {
                expense.review_note = Some(note).filter(|n| !n.trim().is_empty());
            }

            ledger.edit(expense.clone())?;
            println!("Updated expense {}", expense.id);
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::Delete { id, yes } => {
            session.authorize(View::Reports)?;
            let expense = ledger.resolve(&id)?;
            let id = expense.id.clone();
            let prompt = format!(
                "Delete {} at {} ({})? This cannot be undone",
                expense.amount.format_with_symbol(symbol),
                expense.merchant,
                expense.date.format("%Y-%m-%d")
            );

            if !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let removed = ledger.delete(&id)?;
            println!("Deleted expense {} ({})", removed.id, removed.merchant);
        }
    }

    Ok(())
}
