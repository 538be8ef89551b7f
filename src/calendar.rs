//! Month grid for a single plant: which days were watered, which projected
//! waterings were missed and which are still ahead.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::clock::ReferenceDay;
use crate::error::ScheduleError;
use crate::history::was_watered_on;
use crate::models::Plant;
use crate::schedule::{Cycle, DuePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Watered,
    Missed,
    Next,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day_of_month: u32,
    pub date: NaiveDate,
    pub status: DayStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Weekday of the 1st, Sunday = 0. Layout only.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    /// Grid cells in reading order: `leading_blanks` empty cells, then the days.
    pub fn cells(&self) -> impl Iterator<Item = Option<&CalendarDay>> + '_ {
        (0..self.leading_blanks).map(|_| None).chain(self.days.iter().map(Some))
    }

    pub fn count(&self, status: DayStatus) -> usize {
        self.days.iter().filter(|day| day.status == status).count()
    }
}

pub fn build_month(
    plant: &Plant,
    year: i32,
    month: u32,
    reference: &ReferenceDay,
) -> Result<MonthGrid, ScheduleError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ScheduleError::InvalidMonth { year, month })?;
    let cycle = Cycle::of(plant, reference)?;
    let today = reference.today();

    let days = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| CalendarDay {
            day_of_month: date.day(),
            date,
            status: classify(plant, &cycle, date, today, reference),
        })
        .collect();

    Ok(MonthGrid {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// The month containing the reference day.
pub fn build_current_month(plant: &Plant, reference: &ReferenceDay) -> Result<MonthGrid, ScheduleError> {
    let today = reference.today();
    build_month(plant, today.year(), today.month(), reference)
}

fn classify(plant: &Plant, cycle: &Cycle, date: NaiveDate, today: NaiveDate, reference: &ReferenceDay) -> DayStatus {
    // a logged watering wins over any projection
    if was_watered_on(&plant.care_history, date, reference) {
        return DayStatus::Watered;
    }
    if !cycle.is_due_on(date, DuePolicy::StrictFuture) {
        return DayStatus::Default;
    }
    if date < today {
        DayStatus::Missed
    } else {
        DayStatus::Next
    }
}
