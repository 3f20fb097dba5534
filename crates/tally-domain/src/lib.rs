//! tally-domain
//!
//! Pure domain models for the budget tracker (expense entries and books,
//! budgets, the budget set, the history archive, session/period markers,
//! and the wire records exchanged with the remote stores).
//! No I/O, no services. Only data types and their local invariants.

pub mod book;
pub mod budget;
pub mod common;
pub mod entry;
pub mod history;
pub mod record;
pub mod session;

mod ordered_map;

pub use book::*;
pub use budget::*;
pub use common::*;
pub use entry::*;
pub use history::*;
pub use record::*;
pub use session::*;
