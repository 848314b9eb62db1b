//! Settings CLI commands
//!
//! Business-unit and category administration plus the forwarded-receipt
//! simulation.

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_expense_details;
use crate::error::VyapaarResult;
use crate::services::{
    simulate_forwarded_expense, ExpenseLedger, SessionContext, TaxonomyKind, TaxonomyService,
    View,
};
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// List business units and categories
    List,

    /// Add a business unit
    #[command(name = "add-business")]
    AddBusiness {
        /// Business unit name
        name: String,
    },

    /// Remove a business unit (existing expenses keep their value)
    #[command(name = "remove-business")]
    RemoveBusiness {
        name: String,
    },

    /// Add a category
    #[command(name = "add-category")]
    AddCategory {
        /// Category name
        name: String,
    },

    /// Remove a category (existing expenses keep their value)
    #[command(name = "remove-category")]
    RemoveCategory {
        name: String,
    },

    /// Simulate a receipt forwarded over WhatsApp
    #[command(name = "simulate-forward")]
    SimulateForward,
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SettingsCommands,
) -> VyapaarResult<()> {
    let session = SessionContext::restore(storage)?;
    session.authorize(View::Settings)?;
    let mut ledger = ExpenseLedger::open(storage)?;

    match cmd {
        SettingsCommands::List => {
            let service = TaxonomyService::new(&mut ledger);

            println!("Business Units:");
            for unit in service.business_units() {
                let used = service.usage_count(TaxonomyKind::BusinessUnit, unit);
                println!("  {:<28} {} expense(s)", unit, used);
            }
            println!();
            println!("Expense Categories:");
            for category in service.categories() {
                let used = service.usage_count(TaxonomyKind::Category, category);
                println!("  {:<28} {} expense(s)", category, used);
            }
        }

        SettingsCommands::AddBusiness { name } => {
            add(&mut ledger, TaxonomyKind::BusinessUnit, &name)?;
        }
        SettingsCommands::RemoveBusiness { name } => {
            remove(&mut ledger, TaxonomyKind::BusinessUnit, &name)?;
        }
        SettingsCommands::AddCategory { name } => {
            add(&mut ledger, TaxonomyKind::Category, &name)?;
        }
        SettingsCommands::RemoveCategory { name } => {
            remove(&mut ledger, TaxonomyKind::Category, &name)?;
        }

        SettingsCommands::SimulateForward => {
            let expense = simulate_forwarded_expense(&mut ledger, Local::now().date_naive())?;
            println!("New expense received from WhatsApp!");
            print!(
                "{}",
                format_expense_details(&expense, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}

fn add(ledger: &mut ExpenseLedger<'_>, kind: TaxonomyKind, name: &str) -> VyapaarResult<()> {
    let added = TaxonomyService::new(ledger).add(kind, name)?;
    println!("Added: {}", added);
    Ok(())
}

fn remove(ledger: &mut ExpenseLedger<'_>, kind: TaxonomyKind, name: &str) -> VyapaarResult<()> {
    let mut service = TaxonomyService::new(ledger);
    service.remove(kind, name)?;
    println!("Removed: {}", name.trim());

    let still_used = service.usage_count(kind, name.trim());
    if still_used > 0 {
        println!(
            "  {} existing expense(s) still reference it and keep their value.",
            still_used
        );
    }
    Ok(())
}
