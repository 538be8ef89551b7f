use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::clock::ReferenceDay;
use crate::error::{ScheduleError, UnknownVariant};
use crate::models::Plant;
use crate::schedule::compute_status;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentPlant<'a> {
    pub plant: &'a Plant,
    pub days_until_due: i64,
}

/// The `n` thirstiest plants, most overdue first. Ties keep collection order.
/// Non-urgent plants are not filtered out.
///
/// Fails on the first plant whose status cannot be computed.
pub fn top_urgent<'a>(
    plants: &'a [Plant],
    n: usize,
    reference: &ReferenceDay,
) -> Result<Vec<UrgentPlant<'a>>, ScheduleError> {
    let ranked = plants
        .iter()
        .map(|plant| {
            compute_status(plant, reference).map(|status| UrgentPlant {
                plant,
                days_until_due: status.days_until_due,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(take_most_urgent(ranked, n))
}

/// Like [`top_urgent`] but omits plants whose status fails, logging each one.
pub fn top_urgent_lenient<'a>(plants: &'a [Plant], n: usize, reference: &ReferenceDay) -> Vec<UrgentPlant<'a>> {
    let ranked = plants
        .iter()
        .filter_map(|plant| match compute_status(plant, reference) {
            Ok(status) => Some(UrgentPlant {
                plant,
                days_until_due: status.days_until_due,
            }),
            Err(e) => {
                warn!(plant = %plant.id, error = %e, "leaving plant out of urgency ranking");
                None
            }
        })
        .collect();
    take_most_urgent(ranked, n)
}

fn take_most_urgent(mut ranked: Vec<UrgentPlant<'_>>, n: usize) -> Vec<UrgentPlant<'_>> {
    // sort_by_key is stable
    ranked.sort_by_key(|entry| entry.days_until_due);
    ranked.truncate(n);
    ranked
}

/// Sort modes of the collection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Newest,
    LastWatered,
    Urgency,
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "newest" => Ok(SortKey::Newest),
            "last-watered" => Ok(SortKey::LastWatered),
            "urgency" => Ok(SortKey::Urgency),
            _ => Err(UnknownVariant::new("sort key", s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Name => "name",
            SortKey::Newest => "newest",
            SortKey::LastWatered => "last-watered",
            SortKey::Urgency => "urgency",
        })
    }
}

/// Orders the collection for display. Stable; missing dates sort last, as do
/// plants without a computable status under [`SortKey::Urgency`].
pub fn sort_collection<'a>(plants: &'a [Plant], key: SortKey, reference: &ReferenceDay) -> Vec<&'a Plant> {
    let mut sorted: Vec<&Plant> = plants.iter().collect();
    match key {
        SortKey::Name => sorted.sort_by_cached_key(|p| p.name.to_lowercase()),
        SortKey::Newest => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::LastWatered => sorted.sort_by(|a, b| b.last_watered_date.cmp(&a.last_watered_date)),
        SortKey::Urgency => sorted.sort_by_cached_key(|p| match compute_status(p, reference) {
            Ok(status) => (false, status.days_until_due),
            Err(_) => (true, 0),
        }),
    }
    sorted
}
