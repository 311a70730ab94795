use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::Settings;
use crate::handlers::api::layout_payload;
use crate::runtime::build_state;
use crate::service::calendar_service::CalendarService;
use crate::service::time_axis::time_axis;
use crate::service::weather_service::{parse_forecast, FORECAST_DAYS, FORECAST_HOURS};

#[derive(Parser)]
#[command(about = "Inspect dashboard widget data from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out one day of calendar events.
    Calendar {
        /// Day to query, YYYY-MM-DD. Defaults to today in the configured timezone.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Treat every event as all-day.
        #[arg(long)]
        all_day: bool,
    },
    /// Fetch the hourly and daily forecast for a coordinate.
    Forecast {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Render a layout file.
    Layout {
        #[arg(long)]
        name: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn cli(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let state = build_state(&settings)?;
    let now = Utc::now().with_timezone(&settings.timezone);

    match cli.command {
        Commands::Calendar { date, all_day } => {
            let day = date.unwrap_or_else(|| now.date_naive());
            let calendar = CalendarService::day(state.calendar.as_ref(), day, all_day).await?;
            if let Some(window) = calendar.window() {
                print_json(&time_axis(window.min_hour, window.max_hour, &now))?;
            }
            print_json(&calendar)
        }
        Commands::Forecast { lat, lon } => {
            let raw = state.weather.fetch_forecast(lat, lon, FORECAST_DAYS).await?;
            let forecast =
                parse_forecast(&raw, FORECAST_HOURS, FORECAST_DAYS, now.with_timezone(&Utc))?;
            print_json(&forecast)
        }
        Commands::Layout { name } => print_json(&layout_payload(&state, name.as_deref())?),
    }
}
