use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use chrono_tz::Tz;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::calendar_service::day_label;
use super::time_axis::{time_axis, TimeAxis};
use crate::clients::weather_client::WeatherSource;
use crate::clients::FetchError;
use crate::models::weather::{
    description_for, icon_for, CurrentData, DailyData, ForecastData, HistoricalData,
    HourlyData, RawForecastData, RawHistoricalData, RawHistoricalDataMap, DEFAULT_LANG,
};
use crate::models::widget::WidgetSize;

pub const FORECAST_HOURS: usize = 5;
pub const FORECAST_DAYS: usize = 5;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid time zone \"{0}\"")]
    InvalidTimeZone(String),
    #[error("no forthcoming time found")]
    NoForthcomingTime,
    #[error("no forthcoming day found")]
    NoForthcomingDay,
    #[error("failed to find the next coming {count} hours in the forecast data")]
    HoursUnavailable {
        count: usize,
        #[source]
        source: Box<WeatherError>,
    },
    #[error("failed to find the next coming {count} days in the forecast data")]
    DaysUnavailable {
        count: usize,
        #[source]
        source: Box<WeatherError>,
    },
    #[error("forecast series {series} has no entry at index {index}")]
    SeriesTooShort { series: &'static str, index: usize },
    #[error("invalid historical data timestamp \"{0}\"")]
    InvalidTimestamp(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesIndex {
    /// Hour of day (hourly series) or day of month (daily series).
    pub time: u32,
    pub index: usize,
}

fn parse_timezone(name: &str) -> Result<Tz, WeatherError> {
    name.parse::<Tz>()
        .map_err(|_| WeatherError::InvalidTimeZone(name.to_string()))
}

pub fn find_next_hours(
    times: &[String],
    timezone: &str,
    now: DateTime<Utc>,
    count: usize,
) -> Result<Vec<SeriesIndex>, WeatherError> {
    let tz = parse_timezone(timezone)?;
    let next_hour = now.with_timezone(&tz) + Duration::hours(1);
    let key = next_hour.format("%Y-%m-%dT%H:00").to_string();
    let start = times
        .iter()
        .position(|time| *time == key)
        .ok_or(WeatherError::NoForthcomingTime)?;

    Ok((0..count)
        .map(|offset| SeriesIndex {
            time: (next_hour + Duration::hours(offset as i64)).hour(),
            index: start + offset,
        })
        .collect())
}

pub fn find_next_days(
    dates: &[String],
    timezone: &str,
    now: DateTime<Utc>,
    count: usize,
) -> Result<Vec<SeriesIndex>, WeatherError> {
    let tz = parse_timezone(timezone)?;
    let tomorrow = now.with_timezone(&tz).date_naive() + Duration::days(1);
    let key = tomorrow.format("%Y-%m-%d").to_string();
    let start = dates
        .iter()
        .position(|date| *date == key)
        .ok_or(WeatherError::NoForthcomingDay)?;

    Ok((0..count)
        .map(|offset| SeriesIndex {
            time: (tomorrow + Duration::days(offset as i64)).day(),
            index: start + offset,
        })
        .collect())
}

fn at<T: Copy>(series: &[T], name: &'static str, index: usize) -> Result<T, WeatherError> {
    series
        .get(index)
        .copied()
        .ok_or(WeatherError::SeriesTooShort { series: name, index })
}

pub fn parse_forecast(
    data: &RawForecastData,
    n_hour: usize,
    n_day: usize,
    now: DateTime<Utc>,
) -> Result<ForecastData, WeatherError> {
    let current = CurrentData {
        temp: format!("{:.1}°", data.current.temperature_2m),
        weather_icon: icon_for(data.current.weather_code).to_string(),
        weather_name: description_for(data.current.weather_code, DEFAULT_LANG).to_string(),
    };

    let next_hours = find_next_hours(&data.hourly.time, &data.timezone, now, n_hour).map_err(
        |source| WeatherError::HoursUnavailable {
            count: n_hour,
            source: Box::new(source),
        },
    )?;
    let hourly = next_hours
        .iter()
        .map(|next| {
            let code = at(&data.hourly.weather_code, "hourly.weather_code", next.index)?;
            Ok(HourlyData {
                time: next.time.to_string(),
                temp: format!(
                    "{:.1}°",
                    at(&data.hourly.temperature_2m, "hourly.temperature_2m", next.index)?
                ),
                weather_icon: icon_for(code).to_string(),
                weather_name: description_for(code, DEFAULT_LANG).to_string(),
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    let next_days = find_next_days(&data.daily.time, &data.timezone, now, n_day).map_err(
        |source| WeatherError::DaysUnavailable {
            count: n_day,
            source: Box::new(source),
        },
    )?;
    let daily = next_days
        .iter()
        .map(|next| {
            let code = at(&data.daily.weather_code, "daily.weather_code", next.index)?;
            Ok(DailyData {
                time: next.time.to_string(),
                temp_max: format!(
                    "{:.0}°",
                    at(&data.daily.temperature_2m_max, "daily.temperature_2m_max", next.index)?
                ),
                temp_min: format!(
                    "{:.0}°",
                    at(&data.daily.temperature_2m_min, "daily.temperature_2m_min", next.index)?
                ),
                weather_icon: icon_for(code).to_string(),
                weather_name: description_for(code, DEFAULT_LANG).to_string(),
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    Ok(ForecastData {
        current,
        hourly,
        daily,
    })
}

fn first<T: Copy>(measurement: &Option<[Option<T>; 2]>) -> Option<T> {
    measurement.and_then(|pair| pair[0])
}

fn compact(timestamp: i64, raw: &RawHistoricalData) -> HistoricalData {
    HistoricalData {
        timestamp,
        temp: first(&raw.temp),
        humidity: first(&raw.humidity),
        weather: first(&raw.weather),
        precipitation10m: first(&raw.precipitation10m),
        wind: first(&raw.wind),
        wind_direction: first(&raw.wind_direction),
        normal_pressure: first(&raw.normal_pressure),
    }
}

/// Flattens one AMeDAS block, keyed by its `HHMM` time of day. Unordered.
pub fn parse_history(raw: &RawHistoricalDataMap) -> Result<Vec<HistoricalData>, WeatherError> {
    raw.iter()
        .map(|(key, data)| {
            let timestamp = key
                .get(8..12)
                .and_then(|hhmm| hhmm.parse::<i64>().ok())
                .ok_or_else(|| WeatherError::InvalidTimestamp(key.clone()))?;
            Ok(compact(timestamp, data))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub location_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_axis: Option<TimeAxis>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub history: Vec<HistoricalData>,
    #[serde(flatten)]
    pub forecast: ForecastData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub size: WidgetSize,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub amedas_code: Option<String>,
}

pub struct WeatherService;

impl WeatherService {
    pub async fn forecast<S: WeatherSource + ?Sized>(
        source: &S,
        request: &ForecastRequest,
        now: DateTime<Tz>,
    ) -> Result<ForecastPayload, WeatherError> {
        let raw = source
            .fetch_forecast(request.latitude, request.longitude, FORECAST_DAYS)
            .await?;
        let forecast = parse_forecast(&raw, FORECAST_HOURS, FORECAST_DAYS, now.with_timezone(&Utc))?;

        let mut payload = ForecastPayload {
            location_name: request.location_name.clone(),
            today: None,
            time_axis: None,
            history: Vec::new(),
            forecast,
        };

        if request.size == WidgetSize::MiddleV {
            payload.today = Some(day_label(now.date_naive()));
            payload.time_axis = Some(time_axis(0, 24, &now));
            if let Some(code) = request.amedas_code.as_deref() {
                payload.history = Self::history(source, code, now).await?;
            }
        }
        Ok(payload)
    }

    /// Every observation so far today, fetching the three-hour blocks concurrently.
    pub async fn history<S: WeatherSource + ?Sized>(
        source: &S,
        amedas_code: &str,
        now: DateTime<Tz>,
    ) -> Result<Vec<HistoricalData>, WeatherError> {
        let day = now.date_naive();
        let blocks = 0..=now.hour() / 3;
        let fetched = try_join_all(
            blocks.map(|block| source.fetch_history(amedas_code, day, block)),
        )
        .await?;

        let mut history = Vec::new();
        for block in &fetched {
            history.extend(parse_history(block)?);
        }
        history.sort_by_key(|data| data.timestamp);
        tracing::debug!(amedas_code, observations = history.len(), "historical weather merged");
        Ok(history)
    }
}
