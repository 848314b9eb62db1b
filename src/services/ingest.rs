//! Forwarded-receipt simulation
//!
//! Stands in for receipts forwarded over a chat channel: each call produces
//! one pending expense attributed to the bot submitter.

use chrono::NaiveDate;
use rand::Rng;

use crate::error::VyapaarResult;
use crate::models::{
    Expense, ExpenseDraft, Money, PaymentMethod, Receipt, Submitter, Taxonomy, UserId,
};

use super::ledger::ExpenseLedger;

pub const FORWARDED_MERCHANT: &str = "Whatsapp Forwarded Store";
pub const FORWARDED_DESCRIPTION: &str = "Auto-forwarded from +91 98*** ***10";
pub const FORWARDED_RECEIPT_URL: &str =
    "https://placehold.co/400x600/e2e8f0/475569?text=WhatsApp+Screenshot";
const FORWARDED_CATEGORY: &str = "Materials";

/// The bot identity recorded on forwarded expenses
pub fn forwarding_bot() -> Submitter {
    Submitter {
        id: UserId::from("bot"),
        name: "WhatsApp Bot".into(),
    }
}

/// Build the draft for one forwarded receipt
pub fn forwarded_draft<R: Rng + ?Sized>(
    rng: &mut R,
    taxonomy: Taxonomy<'_>,
    today: NaiveDate,
) -> ExpenseDraft {
    ExpenseDraft {
        date: today,
        amount: Money::from_rupees(rng.gen_range(100..5100)),
        merchant: FORWARDED_MERCHANT.into(),
        business_unit: taxonomy
            .business_units
            .first()
            .cloned()
            .unwrap_or_else(|| "Head Office".into()),
        category: FORWARDED_CATEGORY.into(),
        payment_method: PaymentMethod::Upi,
        description: FORWARDED_DESCRIPTION.into(),
        reference_number: None,
        receipt: Some(Receipt::Url(FORWARDED_RECEIPT_URL.into())),
    }
}

/// Submit a simulated forwarded receipt to the ledger
pub fn simulate_forwarded_expense(
    ledger: &mut ExpenseLedger<'_>,
    today: NaiveDate,
) -> VyapaarResult<Expense> {
    let draft = forwarded_draft(&mut rand::thread_rng(), ledger.taxonomy(), today);
    let expense = ledger.submit(draft, forwarding_bot())?;
    log::info!("Simulated forwarded receipt {} for {}", expense.id, expense.amount);
    Ok(expense)
}
