use arbolitos_riego::{
    build_month, build_series, compute_status, top_urgent, CareLogEntry, Classification, DayStatus, Plant,
    ReferenceDay, Window,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 15, 0).unwrap()
}

#[test]
fn weekly_plant_due_on_the_seventh_day() {
    let plant = Plant::new("p", "Sansevieria", 7, Some(at(2024, 1, 1)));
    let status = compute_status(&plant, &ReferenceDay::utc(at(2024, 1, 8))).unwrap();

    assert!(!status.is_watered_today);
    assert_eq!(status.days_until_due, 0);
    assert!(status.is_urgent);
}

#[test]
fn every_three_days_watered_on_schedule_is_exactly_on_target() {
    let plant = Plant::new("p", "Albahaca", 3, Some(at(2024, 3, 1))).with_care([
        CareLogEntry::watered(at(2024, 3, 7)),
        CareLogEntry::watered(at(2024, 3, 1)),
        CareLogEntry::watered(at(2024, 3, 4)),
    ]);
    let report = build_series(&[plant], Window::WEEK, &ReferenceDay::utc(at(2024, 3, 7))).unwrap();

    let required_days: Vec<NaiveDate> = report.points.iter().filter(|p| p.required > 0).map(|p| p.date).collect();
    let watered_days: Vec<NaiveDate> = report.points.iter().filter(|p| p.watered > 0).map(|p| p.date).collect();
    let expected: Vec<NaiveDate> = [1, 4, 7].iter().map(|&d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap()).collect();

    assert_eq!(report.points.len(), 7);
    assert_eq!(required_days, expected);
    assert_eq!(watered_days, expected);
    assert_eq!(report.summary.required, 3);
    assert_eq!(report.summary.watered, 3);
    assert_eq!(report.summary.percent, 100);
    assert_eq!(report.summary.classification, Classification::Good);
}

#[test]
fn calendar_marks_missed_and_next_but_never_the_anchor() {
    let plant = Plant::new("p", "Orquídea", 5, Some(at(2024, 10, 1)));
    let grid = build_month(&plant, 2024, 10, &ReferenceDay::utc(at(2024, 10, 10))).unwrap();
    let status = |d: u32| grid.days[(d - 1) as usize].status;

    assert_eq!(status(6), DayStatus::Missed);
    assert_eq!(status(11), DayStatus::Next);
    assert_eq!(status(1), DayStatus::Default);
}

#[test]
fn one_request_one_today() {
    // the same reference drives status, calendar and chart
    let plant = Plant::new("p", "Helecho", 2, Some(at(2024, 6, 1)))
        .with_care([CareLogEntry::watered(at(2024, 6, 1)), CareLogEntry::watered(at(2024, 6, 3))]);
    let reference = ReferenceDay::utc(at(2024, 6, 5));

    let status = compute_status(&plant, &reference).unwrap();
    let grid = build_month(&plant, 2024, 6, &reference).unwrap();
    let report = build_series(std::slice::from_ref(&plant), Window::days(5).unwrap(), &reference).unwrap();

    assert_eq!(status.days_until_due, -2);
    assert_eq!(grid.days[2].status, DayStatus::Watered);
    assert_eq!(grid.days[4].status, DayStatus::Next);
    assert_eq!(report.points.last().map(|p| p.date), Some(reference.today()));
    // required on 1st, 3rd, 5th; watered on 1st and 3rd
    assert_eq!((report.summary.required, report.summary.watered), (3, 2));
    assert_eq!(report.summary.percent, 67);
    assert_eq!(report.summary.classification, Classification::Caution);
}

#[test]
fn dashboard_thirsty_plants() {
    let reference = ReferenceDay::utc(at(2024, 8, 15));
    let plants = vec![
        Plant::new("a", "Aloe", 14, Some(at(2024, 8, 10))),
        Plant::new("b", "Begonia", 2, Some(at(2024, 8, 10))),
        Plant::new("c", "Croton", 4, Some(at(2024, 8, 10))),
        Plant::new("d", "Dracaena", 7, Some(at(2024, 8, 8))),
    ];

    let top = top_urgent(&plants, 3, &reference).unwrap();
    let names: Vec<&str> = top.iter().map(|p| p.plant.name.as_str()).collect();
    assert_eq!(names, vec!["Begonia", "Croton", "Dracaena"]);
    assert_eq!(top.iter().map(|p| p.days_until_due).collect::<Vec<_>>(), vec![-3, -1, 0]);
}
