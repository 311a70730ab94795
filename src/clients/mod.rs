pub mod notion_client;
pub mod weather_client;

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("failed to fetch {what} (url: {url}): {source}")]
    Request {
        what: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{what} request failed with status {status} (url: {url})")]
    Status {
        what: &'static str,
        url: String,
        status: StatusCode,
    },
    #[error("failed to unmarshal {what} json (url: {url}): {source}")]
    Decode {
        what: &'static str,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(FetchError::Client)
}

pub(crate) struct RawBody {
    pub url: String,
    pub status: StatusCode,
    pub text: String,
}

// Reads the body once so the raw payload can be logged when it does not decode.
pub(crate) async fn read_body(
    what: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<RawBody, FetchError> {
    let response = request.send().await.map_err(|source| FetchError::Request {
        what,
        url: source.url().map(|url| url.to_string()).unwrap_or_default(),
        source,
    })?;
    let url = response.url().to_string();
    let status = response.status();
    let text = response.text().await.map_err(|source| FetchError::Request {
        what,
        url: url.clone(),
        source,
    })?;
    Ok(RawBody { url, status, text })
}

pub(crate) fn decode<T: DeserializeOwned>(what: &'static str, body: &RawBody) -> Result<T, FetchError> {
    serde_json::from_str(&body.text).map_err(|source| {
        tracing::warn!(url = %body.url, error = %source, body = %body.text, "failed to decode {}", what);
        FetchError::Decode {
            what,
            url: body.url.clone(),
            source,
        }
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    what: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, FetchError> {
    let body = read_body(what, request).await?;
    if !body.status.is_success() {
        tracing::warn!(status = %body.status, url = %body.url, body = %body.text, "{} request failed", what);
        return Err(FetchError::Status {
            what,
            url: body.url,
            status: body.status,
        });
    }
    decode(what, &body)
}
