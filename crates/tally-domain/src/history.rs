//! Year/month-indexed archive of past periods' expenses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::book::{ExpenseBook, ExpenseLedger};
use crate::session::PeriodMarker;

/// Snapshot of one archived period: the expense books as they stood when the
/// period departed. Entries are immutable once archived.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodSnapshot {
    pub recurring: ExpenseBook,
    pub one_time: ExpenseBook,
}

impl PeriodSnapshot {
    /// Append-merges a ledger's entries into the snapshot. Names already
    /// present are overwritten in place; nothing is dropped.
    pub fn merge_from(&mut self, ledger: &ExpenseLedger) {
        for (name, entry) in ledger.recurring.iter() {
            self.recurring.insert(name, entry.clone());
        }
        for (name, entry) in ledger.one_time.iter() {
            self.one_time.insert(name, entry.clone());
        }
    }

    pub fn recurring_total(&self) -> f64 {
        self.recurring.total()
    }

    pub fn one_time_total(&self) -> f64 {
        self.one_time.total()
    }

    pub fn is_empty(&self) -> bool {
        self.recurring.is_empty() && self.one_time.is_empty()
    }
}

/// Read-mostly log of archived periods, indexed by year then month (1-12).
/// Cells are created only by the rollover engine and append-merged on
/// revisit, never overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HistoryArchive {
    years: BTreeMap<i32, BTreeMap<u32, PeriodSnapshot>>,
}

impl HistoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.years.values().all(|months| months.is_empty())
    }

    /// Years with at least one archived period, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years
            .iter()
            .filter(|(_, months)| !months.is_empty())
            .map(|(year, _)| *year)
    }

    /// Archived months of `year`, ascending.
    pub fn months_of(&self, year: i32) -> impl Iterator<Item = u32> + '_ {
        self.years
            .get(&year)
            .into_iter()
            .flat_map(|months| months.keys().copied())
    }

    pub fn snapshot(&self, year: i32, month: u32) -> Option<&PeriodSnapshot> {
        self.years.get(&year)?.get(&month)
    }

    pub fn period(&self, marker: PeriodMarker) -> Option<&PeriodSnapshot> {
        self.snapshot(marker.year, marker.month)
    }

    /// Resolves the cell for `marker`, creating it on first use.
    pub fn period_mut(&mut self, marker: PeriodMarker) -> &mut PeriodSnapshot {
        self.years
            .entry(marker.year)
            .or_default()
            .entry(marker.month)
            .or_default()
    }

    /// The most recently archived period, if any.
    pub fn latest(&self) -> Option<(PeriodMarker, &PeriodSnapshot)> {
        self.years.iter().rev().find_map(|(year, months)| {
            months
                .iter()
                .next_back()
                .map(|(month, snapshot)| (PeriodMarker::new(*year, *month), snapshot))
        })
    }

    /// Iterates every archived period in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (PeriodMarker, &PeriodSnapshot)> {
        self.years.iter().flat_map(|(year, months)| {
            months
                .iter()
                .map(move |(month, snapshot)| (PeriodMarker::new(*year, *month), snapshot))
        })
    }
}
