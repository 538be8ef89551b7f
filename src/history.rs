use chrono::NaiveDate;

use crate::clock::ReferenceDay;
use crate::models::{ActionType, CareLogEntry};

/// Whether any `Watered` entry falls on `date`, comparing calendar dates in
/// the reference timezone. History order does not matter.
pub fn was_watered_on(history: &[CareLogEntry], date: NaiveDate, reference: &ReferenceDay) -> bool {
    history
        .iter()
        .any(|entry| entry.action_type == ActionType::Watered && reference.local_date(entry.date) == date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_matches_any_time_of_day() {
        let reference = ReferenceDay::utc(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());
        let history = vec![
            CareLogEntry::watered(Utc.with_ymd_and_hms(2024, 6, 3, 23, 59, 0).unwrap()),
            CareLogEntry::watered(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        ];

        assert!(was_watered_on(&history, day(3), &reference));
        assert!(was_watered_on(&history, day(1), &reference));
        assert!(!was_watered_on(&history, day(2), &reference));
    }

    #[test]
    fn test_ignores_other_actions() {
        let reference = ReferenceDay::utc(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());
        let at = Utc.with_ymd_and_hms(2024, 6, 5, 8, 0, 0).unwrap();
        let history = vec![
            CareLogEntry::new(ActionType::Fertilized, at),
            CareLogEntry::new(ActionType::Repotted, at),
        ];

        assert!(!was_watered_on(&history, day(5), &reference));
        assert!(!was_watered_on(&[], day(5), &reference));
    }

    #[test]
    fn test_uses_reference_timezone() {
        let reference = ReferenceDay::new(
            Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap(),
            chrono_tz::Asia::Tokyo,
        );
        // 20:00 UTC on the 4th is already the 5th in Tokyo
        let history = vec![CareLogEntry::watered(Utc.with_ymd_and_hms(2024, 6, 4, 20, 0, 0).unwrap())];

        assert!(was_watered_on(&history, day(5), &reference));
        assert!(!was_watered_on(&history, day(4), &reference));
    }
}
