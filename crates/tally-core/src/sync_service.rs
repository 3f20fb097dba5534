//! Orchestration between the in-memory model and the remote stores.

use tally_domain::{BudgetSet, HistoryArchive, HistoryRecord, PeriodMarker, Session, UserRecord};

use crate::rollover::{RolloverEngine, RolloverReport};
use crate::store::{HistoryStore, IdentityCache, UserStore};
use crate::time::Clock;
use crate::CoreError;

/// Fetch/persist flows over the store traits, including the remote half of
/// period rollover.
pub struct SyncService;

impl SyncService {
    /// Fetches the identity's record, creating a fresh one on first sign-in,
    /// and decodes it into a session plus budget set. The identity cache is
    /// updated best-effort.
    pub fn open_session(
        store: &dyn UserStore,
        cache: &dyn IdentityCache,
        email: &str,
        clock: &dyn Clock,
    ) -> Result<(Session, BudgetSet), CoreError> {
        let record = match store.fetch(email)? {
            Some(record) => record,
            None => {
                let session = Session::new(email, PeriodMarker::from_date(clock.today()));
                let fresh = UserRecord::from_state(&session, &BudgetSet::new());
                tracing::debug!(email, "creating first user record");
                store.create(&fresh)?
            }
        };
        let (session, set) = Self::decode_user_record(record)?;
        cache.set(email);
        Ok((session, set))
    }

    /// Encodes and replaces the remote record, then adopts the echoed
    /// authoritative copy (latest-wins). Adoption keeps the session-local
    /// id counter and active cursor, which the wire record does not carry.
    /// On failure the local mutation stands but is not durably saved;
    /// callers retry this write without re-running the mutation.
    pub fn persist(
        store: &dyn UserStore,
        session: &Session,
        set: &mut BudgetSet,
    ) -> Result<(), CoreError> {
        let record = UserRecord::from_state(session, set);
        let echoed = store.replace(&session.email, &record)?;
        let (_, authoritative) = Self::decode_user_record(echoed)?;
        set.adopt(authoritative);
        Ok(())
    }

    /// Fetches the identity's archive, or an empty one when none exists yet.
    pub fn load_history(
        store: &dyn HistoryStore,
        email: &str,
    ) -> Result<HistoryArchive, CoreError> {
        Ok(store
            .fetch(email)?
            .map(HistoryRecord::into_archive)
            .unwrap_or_default())
    }

    /// Runs period rollover against the remote stores. Ordering is what
    /// makes an interrupted run retryable: the archive merge and the remote
    /// history write happen first, and only once the history store has
    /// accepted the departing period's data are one-time books cleared and
    /// the marker advanced. A remote failure aborts with the marker (and
    /// the ledgers) untouched.
    pub fn run_rollover(
        user_store: &dyn UserStore,
        history_store: &dyn HistoryStore,
        engine: &mut RolloverEngine,
        session: &mut Session,
        set: &mut BudgetSet,
        archive: &mut HistoryArchive,
        clock: &dyn Clock,
    ) -> Result<Option<RolloverReport>, CoreError> {
        let current = PeriodMarker::from_date(clock.today());
        if !session.marker.is_before(current) {
            return Ok(None);
        }

        let entries = engine.migrate(set, archive, session.marker);
        let record = HistoryRecord::from_archive(&session.email, archive);
        let push = match history_store.fetch(&session.email) {
            Ok(Some(_)) => history_store.replace(&session.email, &record),
            Ok(None) => history_store.create(&record),
            Err(err) => Err(err),
        };
        if let Err(err) = push {
            engine.abort();
            return Err(err);
        }

        let report = engine.finalize(session, set, current, entries);
        Self::persist(user_store, session, set)?;
        Ok(Some(report))
    }

    /// Decodes a wire record, validating the pieces the contract leaves to
    /// convention: a non-empty identity and an in-range month.
    pub fn decode_user_record(record: UserRecord) -> Result<(Session, BudgetSet), CoreError> {
        if record.email.is_empty() {
            return Err(CoreError::InvalidRecord("record has no email".into()));
        }
        let marker = record.marker();
        if !(1..=12).contains(&marker.month) {
            return Err(CoreError::InvalidRecord(format!(
                "month {} is out of range",
                marker.month
            )));
        }
        let session = Session::new(record.email.clone(), marker);
        let set = record.into_budget_set();
        Ok((session, set))
    }
}
