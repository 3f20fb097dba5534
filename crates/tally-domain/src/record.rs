//! Wire records exchanged with the remote user and history stores.
//!
//! Field names here are fixed by the remote contract (`eventKey`,
//! `monthlyExpense`, `addExpense`, `value`, ...); the conversion helpers map
//! between this shape and the internal model.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::book::ExpenseBook;
use crate::budget::{Budget, BudgetSet};
use crate::entry::ExpenseEntry;
use crate::history::{HistoryArchive, PeriodSnapshot};
use crate::session::{PeriodMarker, Session};

/// One expense as the remote stores represent it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordExpense {
    pub value: f64,
    #[serde(default)]
    pub comment: String,
    pub expense_date: NaiveDate,
    pub input_date: NaiveDate,
}

impl From<&ExpenseEntry> for RecordExpense {
    fn from(entry: &ExpenseEntry) -> Self {
        Self {
            value: entry.amount,
            comment: entry.comment.clone(),
            expense_date: entry.expense_date,
            input_date: entry.input_date,
        }
    }
}

impl From<RecordExpense> for ExpenseEntry {
    fn from(record: RecordExpense) -> Self {
        ExpenseEntry::new(
            record.value,
            record.comment,
            record.expense_date,
            record.input_date,
        )
    }
}

/// Name-keyed expense object whose key order is part of the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordExpenseMap(pub Vec<(String, RecordExpense)>);

impl Serialize for RecordExpenseMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::ordered_map::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for RecordExpenseMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::ordered_map::deserialize(deserializer).map(Self)
    }
}

impl From<&ExpenseBook> for RecordExpenseMap {
    fn from(book: &ExpenseBook) -> Self {
        Self(
            book.iter()
                .map(|(name, entry)| (name.to_owned(), RecordExpense::from(entry)))
                .collect(),
        )
    }
}

impl From<RecordExpenseMap> for ExpenseBook {
    fn from(map: RecordExpenseMap) -> Self {
        map.0
            .into_iter()
            .map(|(name, record)| (name, ExpenseEntry::from(record)))
            .collect()
    }
}

/// One budget ("tab") as serialized in the user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordBudget {
    pub event_key: u64,
    pub title: String,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub monthly_expense: RecordExpenseMap,
    #[serde(default)]
    pub add_expense: RecordExpenseMap,
}

impl From<&Budget> for RecordBudget {
    fn from(budget: &Budget) -> Self {
        Self {
            event_key: budget.id,
            title: budget.title.clone(),
            income: budget.income,
            monthly_expense: RecordExpenseMap::from(&budget.ledger.recurring),
            add_expense: RecordExpenseMap::from(&budget.ledger.one_time),
        }
    }
}

impl From<RecordBudget> for Budget {
    fn from(record: RecordBudget) -> Self {
        let mut budget = Budget::new(record.event_key, record.title);
        budget.income = record.income;
        budget.ledger.recurring = ExpenseBook::from(record.monthly_expense);
        budget.ledger.one_time = ExpenseBook::from(record.add_expense);
        budget
    }
}

/// Serialized form of a user's budget set plus the session period marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub budgets: Vec<RecordBudget>,
    pub last_accessed_year: i32,
    pub last_accessed_month: u32,
}

impl UserRecord {
    pub fn from_state(session: &Session, set: &BudgetSet) -> Self {
        Self {
            email: session.email.clone(),
            budgets: set.budgets().iter().map(RecordBudget::from).collect(),
            last_accessed_year: session.marker.year,
            last_accessed_month: session.marker.month,
        }
    }

    pub fn marker(&self) -> PeriodMarker {
        PeriodMarker::new(self.last_accessed_year, self.last_accessed_month)
    }

    /// Rebuilds the budget set. The record carries no cursor, so the cursor
    /// resolves to the first budget.
    pub fn into_budget_set(self) -> BudgetSet {
        let budgets: Vec<Budget> = self.budgets.into_iter().map(Budget::from).collect();
        let active = budgets.first().map(|b| b.id).unwrap_or_default();
        BudgetSet::from_budgets(budgets, active)
    }
}

/// One archived period as serialized in the history record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordHistoryCell {
    #[serde(default)]
    pub monthly_expense: RecordExpenseMap,
    #[serde(default)]
    pub add_expense: RecordExpenseMap,
}

/// Serialized form of a user's history archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub email: String,
    #[serde(default)]
    pub history: BTreeMap<i32, BTreeMap<u32, RecordHistoryCell>>,
}

impl HistoryRecord {
    pub fn from_archive(email: impl Into<String>, archive: &HistoryArchive) -> Self {
        let mut history: BTreeMap<i32, BTreeMap<u32, RecordHistoryCell>> = BTreeMap::new();
        for (marker, snapshot) in archive.iter() {
            history.entry(marker.year).or_default().insert(
                marker.month,
                RecordHistoryCell {
                    monthly_expense: RecordExpenseMap::from(&snapshot.recurring),
                    add_expense: RecordExpenseMap::from(&snapshot.one_time),
                },
            );
        }
        Self {
            email: email.into(),
            history,
        }
    }

    pub fn into_archive(self) -> HistoryArchive {
        let mut archive = HistoryArchive::new();
        for (year, months) in self.history {
            for (month, cell) in months {
                let snapshot = archive.period_mut(PeriodMarker::new(year, month));
                *snapshot = PeriodSnapshot {
                    recurring: ExpenseBook::from(cell.monthly_expense),
                    one_time: ExpenseBook::from(cell.add_expense),
                };
            }
        }
        archive
    }
}
