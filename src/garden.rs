use serde::Serialize;

use crate::clock::{days_between, ReferenceDay};
use crate::models::{Plant, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenStats {
    /// Whole days since the garden was started; 0 when no start is known.
    pub garden_age_days: i64,
    pub alive: usize,
    pub total_ever: usize,
    pub survival_percent: u32,
}

/// Age and survival figures for the owner's dashboard.
///
/// The garden starts when the user signed up, or failing that when the
/// oldest plant was first tracked. A garden started today counts as one day
/// old.
pub fn garden_stats(user: Option<&User>, plants: &[Plant], reference: &ReferenceDay) -> GardenStats {
    let started = user
        .and_then(|u| u.created_at)
        .or_else(|| plants.iter().filter_map(|p| p.created_at).min());

    let garden_age_days = started
        .map(|ts| days_between(reference.local_date(ts), reference.today()).max(1))
        .unwrap_or(0);

    let alive = plants.len();
    let total_ever = alive + user.map_or(0, |u| u.death_count as usize);
    let survival_percent = if total_ever == 0 {
        100
    } else {
        ((200 * alive + total_ever) / (2 * total_ever)) as u32
    };

    GardenStats {
        garden_age_days,
        alive,
        total_ever,
        survival_percent,
    }
}
