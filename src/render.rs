//! Text output for the terminal.

use arbolitos_riego::{
    Classification, ConsistencyReport, DayStatus, GardenStats, MonthGrid, Plant, ScheduleError, ScheduleStatus,
    UrgentPlant,
};
use serde::Serialize;

const WEEKDAYS: [&str; 7] = ["Do", "Lu", "Ma", "Mi", "Ju", "Vi", "Sá"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> StatusRow<'a> {
    pub fn new(plant: &'a Plant, status: Result<ScheduleStatus, ScheduleError>) -> Self {
        let (status, error) = match status {
            Ok(status) => (Some(status), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            id: &plant.id,
            name: &plant.name,
            status,
            error,
        }
    }
}

pub fn status_badge(status: &ScheduleStatus) -> String {
    if status.is_watered_today {
        "💧 regada hoy".to_string()
    } else if status.is_urgent {
        match status.days_until_due {
            0 => "🚨 ¡toca hoy!".to_string(),
            d => format!("🚨 atrasada {} día(s)", -d),
        }
    } else {
        format!("🌱 en {} día(s) ({})", status.days_until_due, status.next_due_date)
    }
}

pub fn print_status(rows: &[StatusRow<'_>]) {
    if rows.is_empty() {
        println!("No se encontraron plantas");
        return;
    }
    for row in rows {
        let badge = match (&row.status, &row.error) {
            (Some(status), _) => status_badge(status),
            (None, Some(error)) => format!("⚠ {}", error),
            (None, None) => String::new(),
        };
        println!("{} '{}': {}", row.id, row.name, badge);
    }
}

pub fn print_urgent(plants: &[UrgentPlant<'_>]) {
    if plants.is_empty() {
        println!("No se encontraron plantas");
        return;
    }
    for (i, entry) in plants.iter().enumerate() {
        let when = match entry.days_until_due {
            d if d < 0 => format!("atrasada {} día(s)", -d),
            0 => "hoy".to_string(),
            d => format!("en {} día(s)", d),
        };
        println!("{}. '{}' ({}): {}", i + 1, entry.plant.name, entry.plant.id, when);
    }
}

pub fn print_calendar(plant: &Plant, grid: &MonthGrid) {
    println!("'{}' {:04}-{:02}", plant.name, grid.year, grid.month);
    println!("{}", WEEKDAYS.map(|d| format!("{:>4}", d)).concat());

    let cells: Vec<String> = grid
        .cells()
        .map(|cell| match cell {
            None => "    ".to_string(),
            Some(day) => format!("{:>3}{}", day.day_of_month, status_mark(day.status)),
        })
        .collect();
    for week in cells.chunks(7) {
        println!("{}", week.concat());
    }

    println!(
        "* regada: {}  ! perdida: {}  + próxima: {}",
        grid.count(DayStatus::Watered),
        grid.count(DayStatus::Missed),
        grid.count(DayStatus::Next)
    );
}

fn status_mark(status: DayStatus) -> char {
    match status {
        DayStatus::Watered => '*',
        DayStatus::Missed => '!',
        DayStatus::Next => '+',
        DayStatus::Default => ' ',
    }
}

pub fn print_consistency(report: &ConsistencyReport) {
    for point in &report.points {
        println!(
            "{:>7}  requeridos: {:>3}  regados: {:>3}",
            point.label, point.required, point.watered
        );
    }
    let summary = &report.summary;
    println!(
        "Constancia ({}): {}% {} ({} de {})",
        report.window,
        summary.percent,
        classification_label(summary.classification),
        summary.watered,
        summary.required
    );
}

fn classification_label(classification: Classification) -> &'static str {
    match classification {
        Classification::Overwatering => "¡EXCESO DE RIEGO!",
        Classification::Good => "bien",
        Classification::Caution => "cuidado",
        Classification::Poor => "mal",
    }
}

pub fn print_garden(stats: &GardenStats) {
    println!(
        "Edad del jardín: {} día(s)\nVivas: {} de {}\nSupervivencia: {}%",
        stats.garden_age_days, stats.alive, stats.total_ever, stats.survival_percent
    );
}
