//! Dashboard summary
//!
//! Headline figures for the admin landing view.

use crate::models::{Expense, Money};

/// Approved spend attributed to one business unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTotal {
    pub business_unit: String,
    pub total: Money,
}

/// Aggregates derived from the whole ledger
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// Sum of approved amounts
    pub total_approved: Money,
    /// Sum of pending amounts
    pub pending_amount: Money,
    pub pending_count: usize,
    pub approved_count: usize,
    /// Approved total divided by approved count, zero when none
    pub average_ticket: Money,
    /// Approved totals per unit, in first-appearance order
    pub by_business_unit: Vec<UnitTotal>,
    /// The first expenses of the ledger
    pub recent: Vec<Expense>,
}

impl DashboardSummary {
    pub fn generate(expenses: &[Expense], recent_count: usize) -> Self {
        let mut total_approved = Money::zero();
        let mut approved_count = 0;
        let mut pending_amount = Money::zero();
        let mut pending_count = 0;
        let mut by_business_unit: Vec<UnitTotal> = Vec::new();

        for expense in expenses {
            if expense.is_pending() {
                pending_amount += expense.amount;
                pending_count += 1;
            }
            if !expense.is_approved() {
                continue;
            }

            total_approved += expense.amount;
            approved_count += 1;
            match by_business_unit
                .iter_mut()
                .find(|u| u.business_unit == expense.business_unit)
            {
                Some(unit) => unit.total += expense.amount,
                None => by_business_unit.push(UnitTotal {
                    business_unit: expense.business_unit.clone(),
                    total: expense.amount,
                }),
            }
        }

        Self {
            total_approved,
            pending_amount,
            pending_count,
            approved_count,
            average_ticket: total_approved.average_over(approved_count),
            by_business_unit,
            recent: expenses.iter().take(recent_count).cloned().collect(),
        }
    }

    /// Largest per-unit total, for scaling bar charts
    pub fn max_unit_total(&self) -> Money {
        self.by_business_unit
            .iter()
            .map(|u| u.total)
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppData, ExpenseStatus};

    #[test]
    fn test_seed_dashboard() {
        let data = AppData::seed();
        let summary = DashboardSummary::generate(&data.expenses, 4);

        assert_eq!(summary.total_approved, Money::from_rupees(12500));
        assert_eq!(summary.pending_amount, Money::from_rupees(3650));
        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.average_ticket, Money::from_rupees(12500));
        assert_eq!(
            summary.by_business_unit,
            vec![UnitTotal {
                business_unit: "Construction Projects".into(),
                total: Money::from_rupees(12500),
            }]
        );
        assert_eq!(summary.recent.len(), 3);
    }

    #[test]
    fn test_empty_ledger() {
        let summary = DashboardSummary::generate(&[], 4);
        assert_eq!(summary.total_approved, Money::zero());
        assert_eq!(summary.average_ticket, Money::zero());
        assert!(summary.by_business_unit.is_empty());
        assert_eq!(summary.max_unit_total(), Money::zero());
    }

    #[test]
    fn test_unit_totals_in_first_appearance_order() {
        let mut data = AppData::seed();
        for expense in data.expenses.iter_mut() {
            expense.status = ExpenseStatus::Approved;
        }
        data.expenses[2].business_unit = "Construction Projects".into();

        let summary = DashboardSummary::generate(&data.expenses, 2);
        let units: Vec<_> = summary
            .by_business_unit
            .iter()
            .map(|u| (u.business_unit.as_str(), u.total))
            .collect();
        assert_eq!(
            units,
            vec![
                ("Construction Projects", Money::from_rupees(15700)),
                ("Brick Factory", Money::from_rupees(450)),
            ]
        );
        assert_eq!(summary.average_ticket, Money::from_rupees(5383) + Money::from_paise(33));
        assert_eq!(summary.recent.len(), 2);
    }
}
