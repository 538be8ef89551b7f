//! Watering cycle arithmetic shared by the status badge, the calendar and the
//! consistency chart.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::clock::{days_between, ReferenceDay};
use crate::error::ScheduleError;
use crate::models::Plant;

/// Which offsets from the anchor count as a due day.
///
/// Both views water on multiples of the interval; they disagree on the anchor
/// day itself. The calendar never marks the day you watered as due, the
/// consistency chart does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DuePolicy {
    /// `diff > 0 && diff % interval == 0`
    StrictFuture,
    /// `diff >= 0 && diff % interval == 0`
    Inclusive,
}

impl DuePolicy {
    fn admits(self, diff: i64, interval_days: i64) -> bool {
        let started = match self {
            DuePolicy::StrictFuture => diff > 0,
            DuePolicy::Inclusive => diff >= 0,
        };
        started && diff % interval_days == 0
    }
}

/// A validated watering cycle: interval >= 1 and an anchor date, both in the
/// reference calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    anchor: NaiveDate,
    interval_days: i64,
    next_due: NaiveDate,
}

impl Cycle {
    pub fn of(plant: &Plant, reference: &ReferenceDay) -> Result<Self, ScheduleError> {
        let interval_days = plant.watering_interval_days;
        let invalid = || ScheduleError::InvalidInterval {
            plant: plant.name.clone(),
            interval: interval_days,
        };
        if interval_days < 1 {
            return Err(invalid());
        }

        let anchor = plant
            .last_watered_date
            .map(|ts| reference.local_date(ts))
            .ok_or_else(|| ScheduleError::MissingAnchorDate {
                plant: plant.name.clone(),
            })?;

        let next_due = u64::try_from(interval_days)
            .ok()
            .and_then(|days| anchor.checked_add_days(Days::new(days)))
            .ok_or_else(invalid)?;

        Ok(Self {
            anchor,
            interval_days,
            next_due,
        })
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn interval_days(&self) -> i64 {
        self.interval_days
    }

    pub fn next_due(&self) -> NaiveDate {
        self.next_due
    }

    pub fn days_since_anchor(&self, date: NaiveDate) -> i64 {
        days_between(self.anchor, date)
    }

    /// Projected-due test for `date`, independent of whether watering happened.
    pub fn is_due_on(&self, date: NaiveDate, policy: DuePolicy) -> bool {
        policy.admits(self.days_since_anchor(date), self.interval_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatus {
    pub is_watered_today: bool,
    pub next_due_date: NaiveDate,
    /// Negative when overdue.
    pub days_until_due: i64,
    pub is_urgent: bool,
}

pub fn compute_status(plant: &Plant, reference: &ReferenceDay) -> Result<ScheduleStatus, ScheduleError> {
    let cycle = Cycle::of(plant, reference)?;
    let today = reference.today();

    let is_watered_today = cycle.anchor() == today;
    let days_until_due = days_between(today, cycle.next_due());

    Ok(ScheduleStatus {
        is_watered_today,
        next_due_date: cycle.next_due(),
        days_until_due,
        is_urgent: days_until_due <= 0 && !is_watered_today,
    })
}
