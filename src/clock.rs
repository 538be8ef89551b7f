//! The caller's single notion of "today".
//!
//! Every computation in this crate takes a [`ReferenceDay`] instead of reading
//! the system clock, so a whole request (status badges, calendar, chart) is
//! evaluated against the same instant and timezone.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDay {
    now: DateTime<Utc>,
    tz: Tz,
}

impl ReferenceDay {
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        Self { now, tz }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Tz::UTC)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Calendar date of the reference instant in the reference timezone.
    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    /// Strips time-of-day: the calendar date `ts` falls on in the reference timezone.
    pub fn local_date(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.tz).date_naive()
    }
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
