//! Watering schedules and care-consistency analytics for a plant collection.
//!
//! Every entry point takes a [`ReferenceDay`]; nothing here reads the system
//! clock, touches the store or mutates a [`Plant`].

pub mod calendar;
pub mod clock;
pub mod consistency;
pub mod error;
pub mod garden;
pub mod history;
pub mod models;
pub mod ranking;
pub mod schedule;

pub use calendar::{build_current_month, build_month, CalendarDay, DayStatus, MonthGrid};
pub use clock::ReferenceDay;
pub use consistency::{
    build_series, build_series_lenient, Classification, ConsistencyReport, ConsistencySummary, SeriesPoint, Window,
};
pub use error::ScheduleError;
pub use garden::{garden_stats, GardenStats};
pub use history::was_watered_on;
pub use models::{ActionType, CareLogEntry, Location, Plant, User};
pub use ranking::{sort_collection, top_urgent, top_urgent_lenient, SortKey, UrgentPlant};
pub use schedule::{compute_status, Cycle, DuePolicy, ScheduleStatus};
