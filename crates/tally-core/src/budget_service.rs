//! Mutation helpers for the per-session budget set.

use tally_domain::{Budget, BudgetSet, DEFAULT_BUDGET_ID};

use crate::money;
use crate::CoreError;

/// Provides validated mutations over a [`BudgetSet`].
pub struct BudgetService;

impl BudgetService {
    /// Adds a budget under the next monotonic id, makes it active, and
    /// returns its id. Ids are never reused, even after removals.
    pub fn add_budget(set: &mut BudgetSet, title: impl Into<String>) -> u64 {
        set.allocate(title)
    }

    /// Removes a budget. The default budget (id 0) is protected; removing
    /// the active budget moves the cursor to the first remaining one.
    pub fn remove_budget(set: &mut BudgetSet, id: u64) -> Result<Budget, CoreError> {
        if id == DEFAULT_BUDGET_ID {
            return Err(CoreError::CannotRemoveDefaultBudget);
        }
        set.remove(id).ok_or(CoreError::BudgetNotFound(id))
    }

    pub fn set_active(set: &mut BudgetSet, id: u64) -> Result<(), CoreError> {
        if set.set_active(id) {
            Ok(())
        } else {
            Err(CoreError::BudgetNotFound(id))
        }
    }

    pub fn rename_budget(
        set: &mut BudgetSet,
        id: u64,
        title: impl Into<String>,
    ) -> Result<(), CoreError> {
        let budget = set.get_mut(id).ok_or(CoreError::BudgetNotFound(id))?;
        budget.title = title.into();
        Ok(())
    }

    /// Sets the monthly income figure, validated like expense amounts.
    pub fn set_income(set: &mut BudgetSet, id: u64, amount: f64) -> Result<(), CoreError> {
        let amount = money::validate_amount(amount)?;
        let budget = set.get_mut(id).ok_or(CoreError::BudgetNotFound(id))?;
        budget.income = amount;
        Ok(())
    }
}
