//! Insertion-ordered expense collections and the two-category ledger.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::entry::{ExpenseCategory, ExpenseEntry};

/// Uniquely named expenses in a stable, user-controlled order.
///
/// Serializes as a JSON object keyed by expense name; the emitted key order
/// follows the book's order and survives a round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseBook {
    entries: Vec<(String, ExpenseEntry)>,
}

impl Serialize for ExpenseBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::ordered_map::serialize(&self.entries, serializer)
    }
}

impl<'de> Deserialize<'de> for ExpenseBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::ordered_map::deserialize(deserializer).map(|entries| Self { entries })
    }
}

impl ExpenseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ExpenseEntry> {
        self.position(name).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ExpenseEntry> {
        let index = self.position(name)?;
        Some(&mut self.entries[index].1)
    }

    /// Inserts or overwrites the named entry. An existing entry keeps its
    /// position; a new one is appended. Returns the replaced entry, if any.
    pub fn insert(&mut self, name: impl Into<String>, entry: ExpenseEntry) -> Option<ExpenseEntry> {
        let name = name.into();
        match self.position(&name) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.entries[index].1, entry);
                Some(previous)
            }
            None => {
                self.entries.push((name, entry));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ExpenseEntry> {
        let index = self.position(name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExpenseEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Sum of all amounts in the book; empty books sum to zero.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, entry)| entry.amount).sum()
    }

    /// Rearranges the book to match `order`. Returns `false` (leaving the
    /// book untouched) unless `order` is a permutation of the current names.
    pub fn apply_order(&mut self, order: &[String]) -> bool {
        if order.len() != self.entries.len() {
            return false;
        }
        let mut reordered = Vec::with_capacity(self.entries.len());
        for name in order {
            match self.position(name) {
                Some(index) if !reordered.iter().any(|(n, _)| n == name) => {
                    reordered.push(self.entries[index].clone());
                }
                _ => return false,
            }
        }
        self.entries = reordered;
        true
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == name)
    }
}

impl FromIterator<(String, ExpenseEntry)> for ExpenseBook {
    fn from_iter<I: IntoIterator<Item = (String, ExpenseEntry)>>(iter: I) -> Self {
        let mut book = ExpenseBook::new();
        for (name, entry) in iter {
            book.insert(name, entry);
        }
        book
    }
}

/// The two categorized expense books of a single budget.
///
/// Invariant: a name lives in at most one category at a time. The insertion
/// helpers here only touch one book; cross-category rules are enforced by
/// the service layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseLedger {
    pub recurring: ExpenseBook,
    pub one_time: ExpenseBook,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book(&self, category: ExpenseCategory) -> &ExpenseBook {
        match category {
            ExpenseCategory::Recurring => &self.recurring,
            ExpenseCategory::OneTime => &self.one_time,
        }
    }

    pub fn book_mut(&mut self, category: ExpenseCategory) -> &mut ExpenseBook {
        match category {
            ExpenseCategory::Recurring => &mut self.recurring,
            ExpenseCategory::OneTime => &mut self.one_time,
        }
    }

    /// Looks the name up across both categories.
    pub fn category_of(&self, name: &str) -> Option<ExpenseCategory> {
        if self.recurring.contains(name) {
            Some(ExpenseCategory::Recurring)
        } else if self.one_time.contains(name) {
            Some(ExpenseCategory::OneTime)
        } else {
            None
        }
    }

    pub fn entry_count(&self) -> usize {
        self.recurring.len() + self.one_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recurring.is_empty() && self.one_time.is_empty()
    }
}
