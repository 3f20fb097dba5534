use thiserror::Error;

use tally_domain::ExpenseCategory;

/// Error type covering every recoverable failure in the core. Nothing here
/// is fatal to the process; each error is scoped to the operation that
/// raised it.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid amount {0}: amounts are non-negative with at most two decimal places")]
    InvalidAmount(f64),
    #[error("reorder is not a permutation of the current {category} names")]
    InvalidPermutation { category: ExpenseCategory },
    #[error("no {category} expense named '{name}'")]
    ExpenseNotFound {
        category: ExpenseCategory,
        name: String,
    },
    #[error("an expense named '{name}' already exists under {category}")]
    DuplicateName {
        category: ExpenseCategory,
        name: String,
    },
    #[error("budget {0} not found")]
    BudgetNotFound(u64),
    #[error("the default budget cannot be removed")]
    CannotRemoveDefaultBudget,
    #[error("malformed remote record: {0}")]
    InvalidRecord(String),
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),
}
