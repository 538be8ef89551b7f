use anyhow::{anyhow, bail, Result};
use arbolitos_riego::{
    build_current_month, build_month, build_series_lenient, compute_status, garden_stats, sort_collection,
    top_urgent_lenient, ReferenceDay,
};
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod db;
mod render;

use cli::{Cli, Commands};
use db::Store;
use render::StatusRow;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // The only clock read: everything below runs against this one day.
    let tz: Tz = cli
        .tz
        .parse()
        .map_err(|e| anyhow!("Zona horaria inválida '{}': {}", cli.tz, e))?;
    let reference = ReferenceDay::new(cli.now.unwrap_or_else(Utc::now), tz);

    let store = Store::connect(&cli.mongo_uri, &cli.database).await?;

    match cli.command {
        Commands::Status { owner, sort } => {
            let plants = store.plants_of(&owner.user).await?;
            let rows: Vec<StatusRow<'_>> = sort_collection(&plants, sort, &reference)
                .into_iter()
                .map(|plant| StatusRow::new(plant, compute_status(plant, &reference)))
                .collect();
            emit(cli.json, &rows[..], render::print_status)?;
        }
        Commands::Urgent { owner, top } => {
            let plants = store.plants_of(&owner.user).await?;
            let urgent = top_urgent_lenient(&plants, top, &reference);
            emit(cli.json, &urgent[..], render::print_urgent)?;
        }
        Commands::Calendar(args) => {
            let Some(plant) = store.plant(&args.plant).await? else {
                bail!("No se encontró planta con ID {}", args.plant);
            };
            let grid = match args.month {
                Some(month) => {
                    let year = args.year.unwrap_or_else(|| reference.today().year());
                    build_month(&plant, year, month, &reference)?
                }
                None => build_current_month(&plant, &reference)?,
            };
            emit(cli.json, &grid, |grid| render::print_calendar(&plant, grid))?;
        }
        Commands::Consistency { owner, window } => {
            let plants = store.plants_of(&owner.user).await?;
            let report = build_series_lenient(&plants, window, &reference)?;
            emit(cli.json, &report, render::print_consistency)?;
        }
        Commands::Garden { owner } => {
            let user = store.user(&owner.user).await?;
            let plants = store.plants_of(&owner.user).await?;
            let stats = garden_stats(user.as_ref(), &plants, &reference);
            emit(cli.json, &stats, render::print_garden)?;
        }
        Commands::Water { plant, notes } => {
            let Some(current) = store.plant(&plant).await? else {
                bail!("No se encontró planta con ID {}", plant);
            };
            if compute_status(&current, &reference).is_ok_and(|status| status.is_watered_today) {
                println!("'{}' ya fue regada hoy", current.name);
                return Ok(());
            }
            if store.record_watering(&plant, reference.now(), &notes).await? {
                info!(plant = %plant, "quick watering");
                println!("Planta '{}' regada", current.name);
            } else {
                println!("No se encontró planta con ID {}", plant);
            }
        }
    }

    Ok(())
}

fn emit<T, F>(json: bool, value: &T, print: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T),
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print(value);
    }
    Ok(())
}
