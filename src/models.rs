use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ScheduleError, UnknownVariant};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Watered,
    Fertilized,
    Repotted,
    Pruned,
    TreatedPest,
    Other,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Watered => "Watered",
            ActionType::Fertilized => "Fertilized",
            ActionType::Repotted => "Repotted",
            ActionType::Pruned => "Pruned",
            ActionType::TreatedPest => "TreatedPest",
            ActionType::Other => "Other",
        }
    }
}

impl FromStr for ActionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Watered" => Ok(ActionType::Watered),
            "Fertilized" => Ok(ActionType::Fertilized),
            "Repotted" => Ok(ActionType::Repotted),
            "Pruned" => Ok(ActionType::Pruned),
            "TreatedPest" => Ok(ActionType::TreatedPest),
            "Other" => Ok(ActionType::Other),
            _ => Err(UnknownVariant::new("action type", s)),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    Indoor,
    Outdoor,
    Balcony,
    Office,
    Other,
}

impl FromStr for Location {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Indoor" => Ok(Location::Indoor),
            "Outdoor" => Ok(Location::Outdoor),
            "Balcony" => Ok(Location::Balcony),
            "Office" => Ok(Location::Office),
            "Other" => Ok(Location::Other),
            _ => Err(UnknownVariant::new("location", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CareLogEntry {
    pub action_type: ActionType,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CareLogEntry {
    pub fn new(action_type: ActionType, date: DateTime<Utc>) -> Self {
        Self {
            action_type,
            date,
            notes: None,
        }
    }

    pub fn watered(date: DateTime<Utc>) -> Self {
        Self::new(ActionType::Watered, date)
    }
}

/// Point-in-time snapshot of a plant, as the schedule computations see it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub species: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub watering_interval_days: i64,
    pub last_watered_date: Option<DateTime<Utc>>,
    pub care_history: Vec<CareLogEntry>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Plant {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        watering_interval_days: i64,
        last_watered_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            name: name.into(),
            species: "Unknown".to_string(),
            location: Location::default(),
            image_url: None,
            watering_interval_days,
            last_watered_date,
            care_history: vec![],
            created_at: None,
        }
    }

    pub fn with_care(mut self, entries: impl IntoIterator<Item = CareLogEntry>) -> Self {
        self.care_history.extend(entries);
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub death_count: u32,
    pub created_at: Option<DateTime<Utc>>,
}

// Store documents. Field names follow what the tracker writes to the
// `plants` and `users` collections.

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CareLogDoc {
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub date: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CareLogDoc {
    pub fn into_entry(self, index: usize) -> Result<CareLogEntry, ScheduleError> {
        let malformed = |reason: String| ScheduleError::MalformedLogEntry { index, reason };

        let action_type = self
            .action_type
            .as_deref()
            .ok_or_else(|| malformed("missing actionType".to_string()))?
            .parse::<ActionType>()
            .map_err(|e| malformed(e.to_string()))?;

        let date = match self.date {
            Some(Bson::DateTime(dt)) => dt.to_chrono(),
            Some(Bson::String(raw)) => DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| malformed(format!("unparsable date '{}': {}", raw, e)))?
                .with_timezone(&Utc),
            Some(other) => {
                return Err(malformed(format!(
                    "date has unexpected type {:?}",
                    other.element_type()
                )))
            }
            None => return Err(malformed("missing date".to_string())),
        };

        Ok(CareLogEntry {
            action_type,
            date,
            notes: self.notes,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlantDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub user_id: Option<ObjectId>,
    // Any BSON number; see `interval_days`.
    #[serde(default, alias = "wateringIntervalDays")]
    pub base_watering_days: Option<Bson>,
    #[serde(default)]
    pub last_watered_date: Option<bson::DateTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    // Kept raw so one bad entry cannot fail the whole document.
    #[serde(default)]
    pub care_history: Vec<Bson>,
    #[serde(default)]
    pub created_at: Option<bson::DateTime>,
}

impl PlantDoc {
    /// Whole-day interval from Int32, Int64 or integral Double values.
    /// Anything else maps to 0 so the schedule reports `InvalidInterval` for
    /// this plant alone.
    pub fn interval_days(&self) -> i64 {
        match &self.base_watering_days {
            Some(Bson::Int32(n)) => i64::from(*n),
            Some(Bson::Int64(n)) => *n,
            Some(Bson::Double(n)) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => *n as i64,
            _ => 0,
        }
    }

    /// Maps the stored document to a snapshot, dropping care log entries that
    /// cannot be read.
    pub fn into_plant(self) -> Plant {
        let watering_interval_days = self.interval_days();
        let id = self.id.map(|oid| oid.to_hex()).unwrap_or_default();
        if watering_interval_days == 0 {
            warn!(plant = %id, raw = ?self.base_watering_days, "watering interval is not a whole number of days");
        }

        let care_history = self
            .care_history
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let entry = bson::from_bson::<CareLogDoc>(raw)
                    .map_err(|e| ScheduleError::MalformedLogEntry {
                        index,
                        reason: e.to_string(),
                    })
                    .and_then(|doc| doc.into_entry(index));
                match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!(plant = %id, error = %e, "skipping care log entry");
                        None
                    }
                }
            })
            .collect();

        let location = match self.location.as_deref() {
            None => Location::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(plant = %id, error = %e, "treating location as Other");
                Location::Other
            }),
        };

        Plant {
            user_id: self.user_id.map(|oid| oid.to_hex()),
            name: self.name,
            species: self.species.unwrap_or_else(|| "Unknown".to_string()),
            location,
            image_url: self.image_url,
            watering_interval_days,
            last_watered_date: self.last_watered_date.map(|dt| dt.to_chrono()),
            care_history,
            created_at: self.created_at.map(|dt| dt.to_chrono()),
            id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub death_count: u32,
    #[serde(default)]
    pub created_at: Option<bson::DateTime>,
}

impl UserDoc {
    pub fn into_user(self) -> User {
        User {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            full_name: self.full_name.unwrap_or_default(),
            death_count: self.death_count,
            created_at: self.created_at.map(|dt| dt.to_chrono()),
        }
    }
}
