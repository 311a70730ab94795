use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{build_http_client, read_json, FetchError};
use crate::models::weather::{RawForecastData, RawHistoricalDataMap};

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        n_day: usize,
    ) -> Result<RawForecastData, FetchError>;

    /// AMeDAS observations for the three-hour block starting at `block * 3` o'clock.
    async fn fetch_history(
        &self,
        amedas_code: &str,
        day: NaiveDate,
        block: u32,
    ) -> Result<RawHistoricalDataMap, FetchError>;
}

pub struct WeatherClient {
    http: reqwest::Client,
    forecast_base_url: String,
    history_base_url: String,
    timezone: String,
}

impl WeatherClient {
    pub fn new(
        forecast_base_url: &str,
        history_base_url: &str,
        timezone: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            http: build_http_client(timeout)?,
            forecast_base_url: forecast_base_url.trim_end_matches('/').to_string(),
            history_base_url: history_base_url.trim_end_matches('/').to_string(),
            timezone: timezone.to_string(),
        })
    }
}

pub fn history_path(amedas_code: &str, day: NaiveDate, block: u32) -> String {
    format!(
        "/bosai/amedas/data/point/{}/{}_{:02}.json",
        amedas_code,
        day.format("%Y%m%d"),
        block * 3
    )
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        n_day: usize,
    ) -> Result<RawForecastData, FetchError> {
        let url = format!("{}/v1/jma", self.forecast_base_url);
        tracing::debug!(latitude, longitude, n_day, "fetching forecast");
        let request = self.http.get(&url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", "temperature_2m,weather_code".to_string()),
            ("hourly", "temperature_2m,weather_code".to_string()),
            (
                "daily",
                "weather_code,temperature_2m_max,temperature_2m_min".to_string(),
            ),
            ("timezone", self.timezone.clone()),
            ("forecast_days", (n_day + 1).to_string()),
        ]);
        read_json("weather data", request).await
    }

    async fn fetch_history(
        &self,
        amedas_code: &str,
        day: NaiveDate,
        block: u32,
    ) -> Result<RawHistoricalDataMap, FetchError> {
        let url = format!(
            "{}{}",
            self.history_base_url,
            history_path(amedas_code, day, block)
        );
        tracing::debug!(%url, "fetching historical weather data");
        read_json("historical weather data", self.http.get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_path_uses_block_start_hour() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            history_path("44132", day, 0),
            "/bosai/amedas/data/point/44132/20240601_00.json"
        );
        assert_eq!(
            history_path("44132", day, 7),
            "/bosai/amedas/data/point/44132/20240601_21.json"
        );
    }
}
