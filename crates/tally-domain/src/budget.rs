//! Budgets and the per-session budget set.

use serde::{Deserialize, Serialize};

use crate::book::ExpenseLedger;
use crate::common::NamedEntity;

/// Reserved id of the default/home budget. It always exists and is never
/// removable.
pub const DEFAULT_BUDGET_ID: u64 = 0;

/// Title given to the default budget when a set is created from scratch.
pub const DEFAULT_BUDGET_TITLE: &str = "Home";

/// One named income + expense-ledger unit. A user may own several.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: u64,
    pub title: String,
    pub income: f64,
    pub ledger: ExpenseLedger,
}

impl Budget {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            income: 0.0,
            ledger: ExpenseLedger::new(),
        }
    }
}

impl NamedEntity for Budget {
    fn name(&self) -> &str {
        &self.title
    }
}

/// Ordered collection of budgets with an active-selection cursor.
///
/// Invariants: the set is never empty, `active_id` always resolves to a
/// member, and ids come from a strictly increasing counter so they are never
/// reused after removals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSet {
    budgets: Vec<Budget>,
    active_id: u64,
    next_id: u64,
}

impl BudgetSet {
    /// Creates a set holding only the default budget, which is also active.
    pub fn new() -> Self {
        Self {
            budgets: vec![Budget::new(DEFAULT_BUDGET_ID, DEFAULT_BUDGET_TITLE)],
            active_id: DEFAULT_BUDGET_ID,
            next_id: DEFAULT_BUDGET_ID + 1,
        }
    }

    /// Rebuilds a set from decoded budgets, restoring the invariants: an
    /// empty list falls back to a fresh default set, a dangling `active_id`
    /// falls back to the first budget, and the id counter resumes past the
    /// largest decoded id.
    pub fn from_budgets(budgets: Vec<Budget>, active_id: u64) -> Self {
        if budgets.is_empty() {
            return Self::new();
        }
        let next_id = budgets.iter().map(|b| b.id + 1).max().unwrap_or(1);
        let active_id = if budgets.iter().any(|b| b.id == active_id) {
            active_id
        } else {
            budgets[0].id
        };
        Self {
            budgets,
            active_id,
            next_id,
        }
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn budgets_mut(&mut self) -> impl Iterator<Item = &mut Budget> {
        self.budgets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn active_id(&self) -> u64 {
        self.active_id
    }

    pub fn get(&self, id: u64) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|b| b.id == id)
    }

    /// The currently selected budget. The cursor invariant guarantees this
    /// resolves.
    pub fn active(&self) -> &Budget {
        self.get(self.active_id)
            .unwrap_or_else(|| &self.budgets[0])
    }

    pub fn active_mut(&mut self) -> &mut Budget {
        let id = self.active_id;
        let index = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .unwrap_or(0);
        &mut self.budgets[index]
    }

    /// Appends a new budget under the next monotonic id, makes it active,
    /// and returns its id.
    pub fn allocate(&mut self, title: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.budgets.push(Budget::new(id, title));
        self.active_id = id;
        id
    }

    /// Removes the budget with `id`, repairing the cursor: if the removed
    /// budget was active the cursor falls back to the first remaining
    /// budget, and an emptied set is recreated with a fresh default budget.
    /// Returns the removed budget, or `None` when `id` does not resolve.
    pub fn remove(&mut self, id: u64) -> Option<Budget> {
        let index = self.budgets.iter().position(|b| b.id == id)?;
        let removed = self.budgets.remove(index);
        if self.budgets.is_empty() {
            self.budgets
                .push(Budget::new(DEFAULT_BUDGET_ID, DEFAULT_BUDGET_TITLE));
        }
        if self.active_id == id {
            self.active_id = self.budgets[0].id;
        }
        Some(removed)
    }

    /// Replaces this set's budgets with an authoritative copy decoded from
    /// the wire, keeping the session-local state the wire does not carry:
    /// the id counter never moves backward (so ids stay unique across the
    /// whole session, removals included) and the active cursor stays put
    /// when it still resolves in the adopted set.
    pub fn adopt(&mut self, authoritative: BudgetSet) {
        let local_next = self.next_id;
        let local_active = self.active_id;
        *self = authoritative;
        self.next_id = self.next_id.max(local_next);
        if self.budgets.iter().any(|b| b.id == local_active) {
            self.active_id = local_active;
        }
    }

    /// Moves the cursor; returns `false` when `id` does not resolve.
    pub fn set_active(&mut self, id: u64) -> bool {
        if self.get(id).is_some() {
            self.active_id = id;
            true
        } else {
            false
        }
    }
}

impl Default for BudgetSet {
    fn default() -> Self {
        Self::new()
    }
}
