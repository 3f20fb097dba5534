//! tally-core
//!
//! Business logic for the budget tracker: expense and budget services, the
//! summary calculator, the period rollover engine, and the sync layer that
//! talks to the remote stores through narrow traits. No terminal I/O and no
//! direct storage access.

pub mod budget_service;
pub mod error;
pub mod expense_service;
pub mod money;
pub mod rollover;
pub mod store;
pub mod summary_service;
pub mod sync_service;
pub mod time;

pub use budget_service::BudgetService;
pub use error::CoreError;
pub use expense_service::ExpenseService;
pub use rollover::{RolloverEngine, RolloverReport, RolloverState};
pub use store::{HistoryStore, IdentityCache, UserStore};
pub use summary_service::{BudgetSummary, NetStanding, SummaryService};
pub use sync_service::SyncService;
pub use time::{Clock, FixedClock, SystemClock};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with sensible defaults and emits a startup
/// info log. Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("tally_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("tally core tracing initialized");
    });
}

#[cfg(test)]
mod tests;
