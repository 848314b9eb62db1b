//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the dashboard and the reports view.

use crate::models::{Expense, Money};
use crate::reports::ReportView;

use super::expense::format_expense_table;

/// Create a simple bar chart representation
pub fn format_bar(value: Money, max_value: Money, width: usize) -> String {
    if max_value.paise() <= 0 || value.paise() <= 0 {
        return " ".repeat(width);
    }

    let ratio = value.paise() as f64 / max_value.paise() as f64;
    let filled = ((ratio * width as f64).round() as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format the filtered expense report with its total
pub fn format_expense_report(view: &ReportView, expenses: &[Expense], symbol: &str) -> String {
    let rows = view.filtered(expenses);
    let mut output = String::new();

    output.push_str(&format!(
        "Expense Report: {} / {}\n",
        view.business(),
        view.month()
    ));
    output.push_str(&double_separator(60));
    output.push('\n');
    output.push_str(&format!(
        "Total Expenses (Filtered): {}\n",
        view.total(expenses).format_with_symbol(symbol)
    ));
    output.push_str(&format!("Records: {}\n\n", rows.len()));

    if rows.is_empty() {
        output.push_str("No records found for selected filters.\n");
    } else {
        output.push_str(&format_expense_table(&rows, symbol));
        output.push('\n');
    }

    output
}

/// One line per month, newest first
pub fn format_month_list(months: &[String]) -> String {
    if months.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let mut output = String::from("Months with expenses:\n");
    for month in months {
        output.push_str(&format!("  {}\n", month));
    }
    output
}
