use std::collections::HashMap;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use super::query::{calendar_query, forecast_query, QueryError};
use crate::clients::notion_client::CalendarSource;
use crate::clients::weather_client::WeatherSource;
use crate::models::calendar::CalendarData;
use crate::models::widget::WidgetSize;
use crate::service::calendar_service::{day_label, CalendarError, CalendarService, DaySummary};
use crate::service::layout_service::{load_layout, render_layout, LayoutError, RenderedLayout};
use crate::service::time_axis::{time_axis, TimeAxis};
use crate::service::weather_service::{ForecastPayload, WeatherError, WeatherService};

#[derive(Clone)]
pub struct AppState {
    pub calendar: Arc<dyn CalendarSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub timezone: Tz,
    pub layouts_dir: PathBuf,
}

impl AppState {
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Query(_) | ApiError::Layout(LayoutError::InvalidName(_)) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalendarPayload {
    Today {
        today: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        time_axis: Option<TimeAxis>,
        calendar: CalendarData,
    },
    Upcoming {
        tomorrow: DaySummary,
        day_after: DaySummary,
    },
}

pub async fn calendar_payload(
    state: &AppState,
    size: WidgetSize,
    now: DateTime<Tz>,
) -> Result<CalendarPayload, ApiError> {
    let source = state.calendar.as_ref();
    let today = now.date_naive();
    match size {
        WidgetSize::MiddleV | WidgetSize::LongV => {
            // The tall variant has no room for a time axis.
            let force_all_day = size == WidgetSize::LongV;
            let calendar = CalendarService::day(source, today, force_all_day).await?;
            let time_axis = calendar
                .window()
                .map(|window| time_axis(window.min_hour, window.max_hour, &now));
            Ok(CalendarPayload::Today {
                today: day_label(today),
                time_axis,
                calendar,
            })
        }
        _ => {
            let (tomorrow, day_after) = futures::try_join!(
                CalendarService::summary(source, today + Duration::days(1)),
                CalendarService::summary(source, today + Duration::days(2)),
            )?;
            Ok(CalendarPayload::Upcoming {
                tomorrow,
                day_after,
            })
        }
    }
}

pub async fn forecast_payload(
    state: &AppState,
    params: &HashMap<String, String>,
    now: DateTime<Tz>,
) -> Result<ForecastPayload, ApiError> {
    let request = forecast_query(params)?;
    Ok(WeatherService::forecast(state.weather.as_ref(), &request, now).await?)
}

pub fn layout_payload(state: &AppState, name: Option<&str>) -> Result<RenderedLayout, ApiError> {
    let layout = load_layout(&state.layouts_dir, name)?;
    Ok(render_layout(&layout)?)
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(body) => warp::reply::json(&body).into_response(),
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(error = %err, "request failed");
            } else {
                tracing::warn!(error = %err, "rejected request");
            }
            warp::reply::with_status(warp::reply::json(&json!({ "error": err.to_string() })), status)
                .into_response()
        }
    }
}

fn request_span(route: &'static str) -> tracing::Span {
    tracing::info_span!("request", route, request_id = %Uuid::new_v4())
}

async fn notion_calendar(
    params: HashMap<String, String>,
    state: AppState,
) -> Result<Response, Infallible> {
    let reply = async move {
        let now = state.now();
        let result = async {
            let size = calendar_query(&params)?;
            calendar_payload(&state, size, now).await
        }
        .await;
        respond(result)
    }
    .instrument(request_span("notioncalendar"))
    .await;
    Ok(reply)
}

async fn weather_forecast(
    params: HashMap<String, String>,
    state: AppState,
) -> Result<Response, Infallible> {
    let reply = async move {
        let result = forecast_payload(&state, &params, state.now()).await;
        respond(result)
    }
    .instrument(request_span("weatherforecast"))
    .await;
    Ok(reply)
}

async fn layout(params: HashMap<String, String>, state: AppState) -> Result<Response, Infallible> {
    let reply = request_span("layout").in_scope(|| {
        respond(layout_payload(&state, params.get("name").map(String::as_str)))
    });
    Ok(reply)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path!("api" / "health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "ok" })));

    let calendar = warp::path!("api" / "notioncalendar")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state.clone()))
        .and_then(notion_calendar);

    let weather = warp::path!("api" / "weatherforecast")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state.clone()))
        .and_then(weather_forecast);

    let layouts = warp::path!("api" / "layout")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state))
        .and_then(layout);

    health.or(calendar).or(weather).or(layouts)
}
