//! Session values and the forward-only period marker.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The last (year, month) a session is known to have processed rollover
/// for. Ordering is lexicographic on (year, month), which matches calendar
/// order for month values 1-12.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct PeriodMarker {
    pub year: i32,
    pub month: u32,
}

impl PeriodMarker {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// `true` when `self` is strictly earlier than `other`.
    pub fn is_before(self, other: PeriodMarker) -> bool {
        self < other
    }

    /// Moves the marker forward to `later`. The marker never moves backward;
    /// a `later` value that is not actually later is ignored and `false` is
    /// returned.
    pub fn advance_to(&mut self, later: PeriodMarker) -> bool {
        if self.is_before(later) {
            *self = later;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for PeriodMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Explicit session value owned by the caller and passed into core
/// operations; there is no ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub email: String,
    pub marker: PeriodMarker,
}

impl Session {
    pub fn new(email: impl Into<String>, marker: PeriodMarker) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            marker,
        }
    }
}
