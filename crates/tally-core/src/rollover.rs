//! Period boundary detection and archival of the departing month.
//!
//! When the current (year, month) is strictly later than the session's
//! period marker, every budget's expenses are append-merged into the
//! archive cell of the *departing* period, one-time expenses are cleared,
//! and the marker advances. The marker only moves after every budget has
//! been migrated, so an interrupted rollover retries safely on next access.
//!
//! Only the single most-recently-departed period is captured per
//! invocation. A session inactive across several month boundaries archives
//! its data once, under the period it last touched; the months nobody used
//! the tracker in are not backfilled with empty cells.

use chrono::NaiveDate;

use tally_domain::{BudgetSet, HistoryArchive, PeriodMarker, Session};

/// Rollover progresses `Current -> Archiving -> Current`; edits to the
/// ledgers being migrated must not be applied while `Archiving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloverState {
    #[default]
    Current,
    Archiving,
}

/// What a completed rollover did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverReport {
    /// The period whose data was archived.
    pub departed: PeriodMarker,
    /// The period the marker advanced to.
    pub current: PeriodMarker,
    pub budgets_migrated: usize,
    pub entries_archived: usize,
}

/// State machine driving period rollover for one budget set.
#[derive(Debug, Default)]
pub struct RolloverEngine {
    state: RolloverState,
}

impl RolloverEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RolloverState {
        self.state
    }

    /// `true` when `today` has crossed a month or year boundary past the
    /// marker.
    pub fn period_elapsed(marker: PeriodMarker, today: NaiveDate) -> bool {
        marker.is_before(PeriodMarker::from_date(today))
    }

    /// Step one: append-merge every budget's books into the departing
    /// period's archive cell. Read-only on the set; repeat calls merge the
    /// same data and are harmless. Returns the number of entries written.
    pub fn migrate(
        &mut self,
        set: &BudgetSet,
        archive: &mut HistoryArchive,
        departing: PeriodMarker,
    ) -> usize {
        self.state = RolloverState::Archiving;
        let mut entries = 0;
        for budget in set.budgets() {
            entries += budget.ledger.entry_count();
            archive.period_mut(departing).merge_from(&budget.ledger);
        }
        entries
    }

    /// Step two, once the migrated data is safe: clear one-time books
    /// (recurring expenses persist into the new period) and advance the
    /// marker. Completes the `Archiving -> Current` transition.
    pub fn finalize(
        &mut self,
        session: &mut Session,
        set: &mut BudgetSet,
        current: PeriodMarker,
        entries_archived: usize,
    ) -> RolloverReport {
        let departed = session.marker;
        let mut budgets_migrated = 0;
        for budget in set.budgets_mut() {
            budget.ledger.one_time.clear();
            budgets_migrated += 1;
        }
        session.marker.advance_to(current);
        self.state = RolloverState::Current;
        tracing::info!(
            %departed,
            %current,
            budgets_migrated,
            entries_archived,
            "archived departing period"
        );
        RolloverReport {
            departed,
            current,
            budgets_migrated,
            entries_archived,
        }
    }

    /// Abandons an in-flight rollover without advancing the marker; the
    /// migration will rerun on next access.
    pub fn abort(&mut self) {
        self.state = RolloverState::Current;
    }

    /// Detects and performs a purely local rollover. Returns `None` when
    /// `today` is still inside the marker's period; the archive and the
    /// marker are left untouched in that case.
    pub fn run(
        &mut self,
        session: &mut Session,
        set: &mut BudgetSet,
        archive: &mut HistoryArchive,
        today: NaiveDate,
    ) -> Option<RolloverReport> {
        if !Self::period_elapsed(session.marker, today) {
            return None;
        }
        let current = PeriodMarker::from_date(today);
        let entries = self.migrate(set, archive, session.marker);
        Some(self.finalize(session, set, current, entries))
    }
}
