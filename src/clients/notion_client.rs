use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone};
use chrono_tz::Tz;
use serde_json::{json, Value};

use super::{build_http_client, decode, read_body, FetchError};
use crate::models::notion::{RawQueryResponse, CATEGORY_PROPERTY, DATE_PROPERTY, EVENT_CATEGORY};

pub const NOTION_VERSION: &str = "2022-06-28";

#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn query_day(&self, day: NaiveDate) -> Result<RawQueryResponse, FetchError>;
}

pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    database_id: Option<String>,
    timezone: Tz,
}

impl NotionClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        database_id: Option<String>,
        timezone: Tz,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            database_id,
            timezone,
        })
    }
}

#[async_trait]
impl CalendarSource for NotionClient {
    async fn query_day(&self, day: NaiveDate) -> Result<RawQueryResponse, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::NotConfigured("NOTION_API_KEY"))?;
        let database_id = self
            .database_id
            .as_deref()
            .ok_or(FetchError::NotConfigured("NOTION_DATABASE_ID"))?;

        let url = format!("{}/v1/databases/{}/query", self.base_url, database_id);
        tracing::debug!(%day, %url, "querying notion calendar");
        let request = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&day_filter(day, &self.timezone));

        let what = "notion calendar data";
        let body = read_body(what, request).await?;
        if body.status.is_success() {
            return decode(what, &body);
        }

        // Notion reports failures as `{"object": "error", "message": ...}`; keep
        // those so the caller can surface the upstream message.
        match serde_json::from_str::<RawQueryResponse>(&body.text) {
            Ok(response) if response.object == "error" => Ok(response),
            _ => {
                tracing::warn!(status = %body.status, url = %body.url, "{} request failed", what);
                Err(FetchError::Status {
                    what,
                    url: body.url,
                    status: body.status,
                })
            }
        }
    }
}

pub fn start_of_day(timezone: &Tz, day: NaiveDate) -> DateTime<Tz> {
    let midnight = day.and_time(NaiveTime::MIN);
    timezone
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| timezone.from_utc_datetime(&midnight))
}

/// Events that end on or after the start of `day`, start before the next day,
/// and belong to the event category.
pub fn day_filter(day: NaiveDate, timezone: &Tz) -> Value {
    let start = start_of_day(timezone, day);
    let next = start_of_day(timezone, day.succ_opt().unwrap_or(day));
    json!({
        "filter": {
            "and": [
                {
                    "property": DATE_PROPERTY,
                    "date": { "on_or_after": start.to_rfc3339_opts(SecondsFormat::Secs, true) }
                },
                {
                    "property": DATE_PROPERTY,
                    "date": { "before": next.to_rfc3339_opts(SecondsFormat::Secs, true) }
                },
                {
                    "property": CATEGORY_PROPERTY,
                    "select": { "equals": EVENT_CATEGORY }
                }
            ]
        }
    })
}
