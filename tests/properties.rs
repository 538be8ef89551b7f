use arbolitos_riego::{
    build_month, build_series, compute_status, CareLogEntry, DayStatus, Plant, ReferenceDay, Window,
};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn base() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn status_is_a_pure_function(
        interval in 1_i64..60,
        anchor_offset in 0_i64..400,
        reference_offset in 0_i64..400,
        minutes in 0_i64..1440,
    ) {
        let plant = Plant::new("p", "Ficus", interval, Some(base() + Duration::days(anchor_offset)));
        let reference = ReferenceDay::utc(base() + Duration::days(reference_offset) + Duration::minutes(minutes));

        let first = compute_status(&plant, &reference).unwrap();
        let second = compute_status(&plant.clone(), &reference).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn watered_today_whenever_anchor_is_today(
        interval in 1_i64..365,
        day in 0_i64..700,
        anchor_minutes in 0_i64..1440,
        now_minutes in 0_i64..1440,
    ) {
        let day_start = base() + Duration::days(day);
        let plant = Plant::new("p", "Ficus", interval, Some(day_start + Duration::minutes(anchor_minutes)));
        let status = compute_status(&plant, &ReferenceDay::utc(day_start + Duration::minutes(now_minutes))).unwrap();

        prop_assert!(status.is_watered_today);
        prop_assert!(!status.is_urgent);
        prop_assert_eq!(status.days_until_due, interval);
    }

    #[test]
    fn calendar_days_have_one_status_and_watered_wins(
        interval in 1_i64..15,
        anchor_offset in 0_i64..60,
        watered in proptest::collection::vec(0_i64..90, 0..20),
        reference_offset in 0_i64..90,
        month in 1_u32..=3,
    ) {
        let plant = Plant::new("p", "Ficus", interval, Some(base() + Duration::days(anchor_offset)))
            .with_care(watered.iter().map(|d| CareLogEntry::watered(base() + Duration::days(*d) + Duration::hours(10))));
        let reference = ReferenceDay::utc(base() + Duration::days(reference_offset));
        let grid = build_month(&plant, 2024, month, &reference).unwrap();

        for day in &grid.days {
            let logged = watered.iter().any(|d| (base() + Duration::days(*d)).date_naive() == day.date);
            prop_assert_eq!(logged, day.status == DayStatus::Watered);
            if logged {
                prop_assert_ne!(day.status, DayStatus::Missed);
            }
        }
    }

    #[test]
    fn daily_plant_requires_every_day_of_the_window(
        window in 1_u32..120,
        anchor_back in 0_i64..30,
    ) {
        let reference = ReferenceDay::utc(base() + Duration::days(200));
        let anchor = base() + Duration::days(200 - i64::from(window) + 1 - anchor_back);
        let plant = Plant::new("p", "Menta", 1, Some(anchor));
        let report = build_series(&[plant], Window::days(window).unwrap(), &reference).unwrap();

        prop_assert_eq!(report.points.len() as u32, window);
        prop_assert_eq!(report.summary.required, window);
    }
}
