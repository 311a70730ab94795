use std::sync::Arc;

use crate::clients::notion_client::NotionClient;
use crate::clients::weather_client::WeatherClient;
use crate::clients::FetchError;
use crate::config::Settings;
use crate::handlers::api::{routes, AppState};

pub fn build_state(settings: &Settings) -> Result<AppState, FetchError> {
    let calendar = NotionClient::new(
        &settings.notion_base_url,
        settings.notion_api_key.clone(),
        settings.notion_database_id.clone(),
        settings.timezone,
        settings.http_timeout,
    )?;
    if settings.notion_api_key.is_none() || settings.notion_database_id.is_none() {
        tracing::warn!("notion credentials missing; calendar requests will fail");
    }
    let weather = WeatherClient::new(
        &settings.open_meteo_base_url,
        &settings.jma_base_url,
        settings.timezone.name(),
        settings.http_timeout,
    )?;

    Ok(AppState {
        calendar: Arc::new(calendar),
        weather: Arc::new(weather),
        timezone: settings.timezone,
        layouts_dir: settings.layouts_dir.clone(),
    })
}

pub async fn run_api(settings: Settings) -> Result<(), FetchError> {
    let state = build_state(&settings)?;
    tracing::info!(
        addr = %settings.bind_addr,
        timezone = %settings.timezone,
        layouts_dir = %settings.layouts_dir.display(),
        "starting dashboard api"
    );
    warp::serve(routes(state)).run(settings.bind_addr).await;
    Ok(())
}
