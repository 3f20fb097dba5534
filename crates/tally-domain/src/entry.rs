//! Expense value objects and categories.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::Amounted;

/// One recorded expense: the amount, a free-text comment, the date the
/// expense applies to, and the date it was typed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub amount: f64,
    #[serde(default)]
    pub comment: String,
    pub expense_date: NaiveDate,
    pub input_date: NaiveDate,
}

impl ExpenseEntry {
    pub fn new(
        amount: f64,
        comment: impl Into<String>,
        expense_date: NaiveDate,
        input_date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            comment: comment.into(),
            expense_date,
            input_date,
        }
    }

    /// Builds an entry whose expense and input dates are both `date`,
    /// matching how freshly recorded expenses default.
    pub fn recorded_on(amount: f64, comment: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(amount, comment, date, date)
    }
}

impl Amounted for ExpenseEntry {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Expense category within a single budget. Recurring expenses survive a
/// period rollover; one-time expenses are cleared by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Recurring,
    OneTime,
}

impl ExpenseCategory {
    /// Returns the opposite category.
    pub fn other(self) -> Self {
        match self {
            ExpenseCategory::Recurring => ExpenseCategory::OneTime,
            ExpenseCategory::OneTime => ExpenseCategory::Recurring,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Recurring => "Monthly",
            ExpenseCategory::OneTime => "One-time",
        };
        f.write_str(label)
    }
}
