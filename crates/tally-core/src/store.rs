//! Boundary traits for the remote record stores and the identity cache.
//!
//! Transport (HTTP verbs, status codes, auth) lives behind these traits and
//! is out of scope here. Implementations map their I/O failures to
//! [`CoreError::RemoteUnavailable`] so the sync layer can keep its
//! retry-safety guarantees.

use tally_domain::{HistoryRecord, UserRecord};

use crate::CoreError;

/// Remote store of per-identity budget records.
pub trait UserStore: Send + Sync {
    /// `Ok(None)` when no record exists for `email`.
    fn fetch(&self, email: &str) -> Result<Option<UserRecord>, CoreError>;

    /// Creates the record and echoes back the stored copy.
    fn create(&self, record: &UserRecord) -> Result<UserRecord, CoreError>;

    /// Replaces the record for `email` and echoes back the authoritative
    /// stored copy.
    fn replace(&self, email: &str, record: &UserRecord) -> Result<UserRecord, CoreError>;
}

/// Remote store of per-identity history records.
pub trait HistoryStore: Send + Sync {
    fn fetch(&self, email: &str) -> Result<Option<HistoryRecord>, CoreError>;
    fn create(&self, record: &HistoryRecord) -> Result<HistoryRecord, CoreError>;
    fn replace(&self, email: &str, record: &HistoryRecord)
        -> Result<HistoryRecord, CoreError>;
}

/// Best-effort cache of the last active identity. Absence is never an
/// error and failures to write are swallowed by implementations.
pub trait IdentityCache {
    fn get(&self) -> Option<String>;
    fn set(&self, email: &str);
    fn clear(&self);
}
