//! Derived totals for display.

use tally_domain::{Budget, ExpenseCategory};

use crate::expense_service::ExpenseService;
use crate::money;

/// Snapshot of a budget's derived figures. Recomputed on demand; never
/// cached, never mutates the budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    pub monthly_total: f64,
    pub one_time_total: f64,
    pub total_expenses: f64,
    pub net_leftover: f64,
    pub standing: NetStanding,
}

/// Sign classification of the leftover figure, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetStanding {
    Surplus,
    Deficit,
    Balanced,
}

/// Pure calculator over a [`Budget`].
pub struct SummaryService;

impl SummaryService {
    pub fn summarize(budget: &Budget) -> BudgetSummary {
        let monthly_total = ExpenseService::total_of(&budget.ledger, ExpenseCategory::Recurring);
        let one_time_total = ExpenseService::total_of(&budget.ledger, ExpenseCategory::OneTime);
        let total_expenses = money::round_cents(monthly_total + one_time_total);
        let net_leftover = money::round_cents(budget.income - total_expenses);
        let standing = if net_leftover > 0.0 {
            NetStanding::Surplus
        } else if net_leftover < 0.0 {
            NetStanding::Deficit
        } else {
            NetStanding::Balanced
        };
        BudgetSummary {
            monthly_total,
            one_time_total,
            total_expenses,
            net_leftover,
            standing,
        }
    }
}
