use thiserror::Error;

/// Failures of the schedule computations.
///
/// `InvalidInterval` and `MissingAnchorDate` are fatal for the plant they name:
/// callers either surface them or drop that plant from an aggregate.
/// `MalformedLogEntry` never escapes a computation; it is reported while
/// mapping store documents and the offending entry is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("plant '{plant}': watering interval must be at least 1 day, got {interval}")]
    InvalidInterval { plant: String, interval: i64 },

    #[error("plant '{plant}' has no last-watered date")]
    MissingAnchorDate { plant: String },

    #[error("care log entry #{index} is malformed: {reason}")]
    MalformedLogEntry { index: usize, reason: String },

    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("window must cover between 1 and {} days", crate::consistency::MAX_WINDOW_DAYS)]
    InvalidWindow,
}

/// A label that does not name any variant of one of the closed enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
