//! Mutation helpers for a budget's expense ledger.

use chrono::NaiveDate;

use tally_domain::{ExpenseCategory, ExpenseEntry, ExpenseLedger};

use crate::money;
use crate::time::Clock;
use crate::CoreError;

/// Provides validated mutations over an [`ExpenseLedger`].
pub struct ExpenseService;

impl ExpenseService {
    /// Creates or overwrites the named expense under `category`. New entries
    /// are appended; existing ones keep their position and have amount,
    /// comment, and both dates replaced in place.
    pub fn upsert(
        ledger: &mut ExpenseLedger,
        category: ExpenseCategory,
        name: impl Into<String>,
        amount: f64,
        comment: impl Into<String>,
        expense_date: NaiveDate,
        input_date: NaiveDate,
    ) -> Result<(), CoreError> {
        let amount = money::validate_amount(amount)?;
        let name = name.into();
        // A name lives in one category at a time; switching goes through
        // move_category.
        if ledger.book(category.other()).contains(&name) {
            return Err(CoreError::DuplicateName {
                category: category.other(),
                name,
            });
        }
        ledger
            .book_mut(category)
            .insert(name, ExpenseEntry::new(amount, comment, expense_date, input_date));
        Ok(())
    }

    /// Records a fresh expense with both dates defaulted to today.
    pub fn record(
        ledger: &mut ExpenseLedger,
        clock: &dyn Clock,
        category: ExpenseCategory,
        name: impl Into<String>,
        amount: f64,
        comment: impl Into<String>,
    ) -> Result<(), CoreError> {
        let today = clock.today();
        Self::upsert(ledger, category, name, amount, comment, today, today)
    }

    /// Removes the named expense. Removal is idempotent: a second call for
    /// the same name returns `None` instead of erroring, so callers can
    /// still tell a no-op delete apart from a real one.
    pub fn remove(
        ledger: &mut ExpenseLedger,
        category: ExpenseCategory,
        name: &str,
    ) -> Option<ExpenseEntry> {
        ledger.book_mut(category).remove(name)
    }

    /// Applies a new display order to `category`. `new_order` must be a
    /// permutation of the current names; amounts are never touched.
    pub fn reorder(
        ledger: &mut ExpenseLedger,
        category: ExpenseCategory,
        new_order: &[String],
    ) -> Result<(), CoreError> {
        if ledger.book_mut(category).apply_order(new_order) {
            Ok(())
        } else {
            Err(CoreError::InvalidPermutation { category })
        }
    }

    /// Moves an expense between categories in one step, so the ledger never
    /// passes through a dual-presence state.
    pub fn move_category(
        ledger: &mut ExpenseLedger,
        name: &str,
        from: ExpenseCategory,
        to: ExpenseCategory,
    ) -> Result<(), CoreError> {
        if from == to {
            return Ok(());
        }
        if ledger.book(to).contains(name) {
            return Err(CoreError::DuplicateName {
                category: to,
                name: name.to_owned(),
            });
        }
        let entry = ledger
            .book_mut(from)
            .remove(name)
            .ok_or_else(|| CoreError::ExpenseNotFound {
                category: from,
                name: name.to_owned(),
            })?;
        ledger.book_mut(to).insert(name, entry);
        Ok(())
    }

    /// Sum of the category's amounts, rounded to whole cents; an empty
    /// category sums to zero.
    pub fn total_of(ledger: &ExpenseLedger, category: ExpenseCategory) -> f64 {
        money::round_cents(ledger.book(category).total())
    }
}
