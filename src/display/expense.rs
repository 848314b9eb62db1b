//! Expense display formatting
//!
//! Tables for expense lists and a detail view for a single expense.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Receipt};

use super::report::truncate;

/// Characters of the id shown in tables
const SHORT_ID_LEN: usize = 8;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Merchant")]
    merchant: String,
    #[tabled(rename = "Business Unit")]
    business_unit: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, symbol: &str) -> Self {
        Self {
            id: short_id(expense),
            date: expense.date.format("%Y-%m-%d").to_string(),
            merchant: truncate(&expense.merchant, 28),
            business_unit: expense.business_unit.clone(),
            category: expense.category.clone(),
            amount: expense.amount.format_with_symbol(symbol),
            status: expense.status.to_string(),
        }
    }
}

/// Leading characters of the id, enough to pass back on the command line
pub fn short_id(expense: &Expense) -> String {
    expense.id.as_str().chars().take(SHORT_ID_LEN).collect()
}

/// Format expenses as a table
pub fn format_expense_table(expenses: &[&Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut table = Table::new(expenses.iter().map(|e| ExpenseRow::new(e, symbol)));
    table
        .with(Style::sharp())
        .modify(Columns::single(5), Alignment::right());
    table.to_string()
}

/// Format every field of one expense
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:        {}\n", expense.id));
    output.push_str(&format!("Date:           {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:         {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Merchant:       {}\n", expense.merchant));
    output.push_str(&format!("Business Unit:  {}\n", expense.business_unit));
    output.push_str(&format!("Category:       {}\n", expense.category));
    output.push_str(&format!("Payment Method: {}\n", expense.payment_method));

    if !expense.description.is_empty() {
        output.push_str(&format!("Description:    {}\n", expense.description));
    }
    if let Some(reference) = &expense.reference_number {
        output.push_str(&format!("Reference:      {}\n", reference));
    }

    match &expense.receipt {
        Some(Receipt::Url(url)) => output.push_str(&format!("Receipt:        {}\n", url)),
        Some(Receipt::Inline(data)) => output.push_str(&format!(
            "Receipt:        attached image ({} bytes encoded)\n",
            data.len()
        )),
        None => {}
    }

    output.push_str(&format!("Status:         {}\n", expense.status));
    if let Some(note) = &expense.review_note {
        output.push_str(&format!("Review Note:    {}\n", note));
    }
    output.push_str(&format!(
        "Submitted By:   {} ({})\n",
        expense.submitted_by.name, expense.submitted_by.id
    ));
    output.push_str(&format!(
        "Submitted At:   {}\n",
        expense.submitted_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppData;

    #[test]
    fn test_table_lists_every_expense() {
        let data = AppData::seed();
        let rows: Vec<&Expense> = data.expenses.iter().collect();
        let table = format_expense_table(&rows, "₹");

        assert!(table.contains("Business Unit"));
        assert!(table.contains("Local Tea Stall"));
        assert!(table.contains("₹12,500.00"));
        assert!(table.contains("Pending Review"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_expense_table(&[], "₹"), "No expenses found.");
    }

    #[test]
    fn test_details() {
        let mut expense = AppData::seed().expenses[2].clone();
        expense.review_note = Some("Check pump slip".into());
        let details = format_expense_details(&expense, "Rs. ");

        assert!(details.contains("Amount:         Rs. 3,200.00"));
        assert!(details.contains("Payment Method: UPI (PhonePe/GPay)"));
        assert!(details.contains("Review Note:    Check pump slip"));
        assert!(details.contains("Driver Mohan (u4)"));
    }

    #[test]
    fn test_short_id() {
        let mut expense = AppData::seed().expenses[0].clone();
        assert_eq!(short_id(&expense), "e1");
        expense.id = "0f8fad5b-d9cb-469f-a165-70867728950e".into();
        assert_eq!(short_id(&expense), "0f8fad5b");
    }
}
