//! Dashboard display formatting

use crate::reports::DashboardSummary;

use super::report::{format_bar, separator, truncate};

const BAR_WIDTH: usize = 24;

/// Format the dashboard summary
pub fn format_dashboard(summary: &DashboardSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Financial Overview\n");
    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format!(
        "{:<24} {:>20}\n",
        "Total Approved",
        summary.total_approved.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<24} {:>20}  ({} items)\n",
        "Pending Review",
        summary.pending_amount.format_with_symbol(symbol),
        summary.pending_count
    ));
    output.push_str(&format!(
        "{:<24} {:>20}\n",
        "Avg Ticket Size",
        summary.average_ticket.format_with_symbol(symbol)
    ));

    output.push_str("\nSpend by Business Unit\n");
    output.push_str(&separator(60));
    output.push('\n');
    if summary.by_business_unit.is_empty() {
        output.push_str("  No approved expenses yet.\n");
    } else {
        let max = summary.max_unit_total();
        for unit in &summary.by_business_unit {
            output.push_str(&format!(
                "  {:<22} {} {}\n",
                truncate(&unit.business_unit, 22),
                format_bar(unit.total, max, BAR_WIDTH),
                unit.total.format_with_symbol(symbol)
            ));
        }
    }

    output.push_str("\nRecent Activity\n");
    output.push_str(&separator(60));
    output.push('\n');
    if summary.recent.is_empty() {
        output.push_str("  Nothing submitted yet.\n");
    }
    for expense in &summary.recent {
        output.push_str(&format!(
            "  {:<24} {:<14} {:>14}  {}\n",
            truncate(&expense.merchant, 24),
            expense.date.format("%Y-%m-%d"),
            expense.amount.format_with_symbol(symbol),
            expense.status
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppData;

    #[test]
    fn test_seed_dashboard_output() {
        let data = AppData::seed();
        let summary = DashboardSummary::generate(&data.expenses, 4);
        let output = format_dashboard(&summary, "₹");

        assert!(output.contains("₹12,500.00"));
        assert!(output.contains("₹3,650.00"));
        assert!(output.contains("(2 items)"));
        assert!(output.contains("Construction Projects"));
        assert!(output.contains("Indian Oil Pump"));
    }

    #[test]
    fn test_empty_dashboard_output() {
        let summary = DashboardSummary::generate(&[], 4);
        let output = format_dashboard(&summary, "₹");
        assert!(output.contains("No approved expenses yet."));
        assert!(output.contains("Nothing submitted yet."));
    }
}
