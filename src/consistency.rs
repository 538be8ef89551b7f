//! Required vs. actual waterings across a collection, one point per day.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::ReferenceDay;
use crate::error::{ScheduleError, UnknownVariant};
use crate::history::was_watered_on;
use crate::models::Plant;
use crate::schedule::{Cycle, DuePolicy};

/// Chart windows up to this many days are labelled by weekday.
const WEEKDAY_LABEL_MAX_DAYS: u32 = 7;

/// Longest window accepted, ten years of daily points.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Length of the consistency window in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window(u32);

impl Window {
    pub const WEEK: Window = Window(7);
    pub const MONTH: Window = Window(30);
    pub const HALF_YEAR: Window = Window(180);
    pub const YEAR: Window = Window(365);

    /// Between 1 and [`MAX_WINDOW_DAYS`] days.
    pub fn days(n: u32) -> Result<Self, ScheduleError> {
        if n == 0 || n > MAX_WINDOW_DAYS {
            return Err(ScheduleError::InvalidWindow);
        }
        Ok(Window(n))
    }

    pub fn days_count(&self) -> u32 {
        self.0
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::WEEK
    }
}

impl FromStr for Window {
    type Err = UnknownVariant;

    /// `7d`, `1m`, `6m`, `1y`, or a day count with optional `d` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Window::WEEK),
            "1m" => Ok(Window::MONTH),
            "6m" => Ok(Window::HALF_YEAR),
            "1y" => Ok(Window::YEAR),
            _ => s
                .strip_suffix('d')
                .unwrap_or(s)
                .parse::<u32>()
                .ok()
                .and_then(|n| Window::days(n).ok())
                .ok_or_else(|| UnknownVariant::new("window", s)),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    Overwatering,
    Good,
    Caution,
    Poor,
}

impl Classification {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            p if p > 100 => Classification::Overwatering,
            p if p > 75 => Classification::Good,
            p if p > 40 => Classification::Caution,
            _ => Classification::Poor,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Classification::Overwatering)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub label: String,
    pub watered: u32,
    pub required: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencySummary {
    pub watered: u32,
    pub required: u32,
    pub percent: u32,
    pub classification: Classification,
}

impl ConsistencySummary {
    pub fn from_points(points: &[SeriesPoint]) -> Self {
        let (watered, required) = points
            .iter()
            .fold((0u32, 0u32), |(w, r), p| (w + p.watered, r + p.required));
        let percent = percent_rounded(watered, required);
        Self {
            watered,
            required,
            percent,
            classification: Classification::from_percent(percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub window: Window,
    pub points: Vec<SeriesPoint>,
    pub summary: ConsistencySummary,
}

/// Builds the series for `window` days ending today, oldest first.
///
/// Any plant whose cycle is invalid fails the whole report.
pub fn build_series(
    plants: &[Plant],
    window: Window,
    reference: &ReferenceDay,
) -> Result<ConsistencyReport, ScheduleError> {
    let cycles = plants
        .iter()
        .map(|plant| Cycle::of(plant, reference).map(|cycle| (plant, cycle)))
        .collect::<Result<Vec<_>, _>>()?;
    aggregate(&cycles, window, reference)
}

/// Like [`build_series`] but leaves out plants with an invalid cycle.
pub fn build_series_lenient(
    plants: &[Plant],
    window: Window,
    reference: &ReferenceDay,
) -> Result<ConsistencyReport, ScheduleError> {
    let cycles: Vec<_> = plants
        .iter()
        .filter_map(|plant| match Cycle::of(plant, reference) {
            Ok(cycle) => Some((plant, cycle)),
            Err(e) => {
                warn!(plant = %plant.id, error = %e, "leaving plant out of consistency report");
                None
            }
        })
        .collect();
    aggregate(&cycles, window, reference)
}

fn aggregate(
    cycles: &[(&Plant, Cycle)],
    window: Window,
    reference: &ReferenceDay,
) -> Result<ConsistencyReport, ScheduleError> {
    let points: Vec<SeriesPoint> = window_dates(reference.today(), window)?
        .map(|date| {
            let (required, watered) = cycles.iter().fold((0u32, 0u32), |(required, watered), (plant, cycle)| {
                (
                    required + u32::from(cycle.is_due_on(date, DuePolicy::Inclusive)),
                    watered + u32::from(was_watered_on(&plant.care_history, date, reference)),
                )
            });
            SeriesPoint {
                date,
                label: point_label(date, window),
                watered,
                required,
            }
        })
        .collect();

    let summary = ConsistencySummary::from_points(&points);
    debug!(
        plants = cycles.len(),
        window = %window,
        watered = summary.watered,
        required = summary.required,
        percent = summary.percent,
        "consistency series built"
    );

    Ok(ConsistencyReport {
        window,
        points,
        summary,
    })
}

/// Every date of the window, oldest first. Fails rather than returning a short
/// series when the window would start before the earliest representable date.
fn window_dates(today: NaiveDate, window: Window) -> Result<impl Iterator<Item = NaiveDate>, ScheduleError> {
    let days = window.days_count();
    let first = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or(ScheduleError::InvalidWindow)?;
    Ok(first.iter_days().take(days as usize))
}

fn point_label(date: NaiveDate, window: Window) -> String {
    if window.days_count() > WEEKDAY_LABEL_MAX_DAYS {
        date.format("%b %-d").to_string()
    } else {
        date.format("%a").to_string()
    }
}

/// `round(watered / required * 100)`, half away from zero; 100 when nothing
/// was required.
fn percent_rounded(watered: u32, required: u32) -> u32 {
    if required == 0 {
        return 100;
    }
    let (w, r) = (u64::from(watered), u64::from(required));
    let percent = (200 * w + r) / (2 * r);
    u32::try_from(percent).unwrap_or(u32::MAX)
}
