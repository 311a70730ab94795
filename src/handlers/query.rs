use std::collections::HashMap;

use thiserror::Error;

use crate::models::widget::{WidgetSize, WidgetType};
use crate::service::weather_service::ForecastRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("please provide size information")]
    MissingSize,
    #[error("invalid size")]
    InvalidSize,
    #[error("please provide location information")]
    MissingLocation,
    #[error("please provide the amedas location code for historical data (Specific parameter for MiddleV)")]
    MissingAmedasCode,
    #[error("please provide valid latitude information")]
    InvalidLatitude,
    #[error("please provide valid longitude information")]
    InvalidLongitude,
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

pub fn widget_size(
    params: &HashMap<String, String>,
    widget_type: WidgetType,
) -> Result<WidgetSize, QueryError> {
    let size = param(params, "size")
        .ok_or(QueryError::MissingSize)?
        .parse::<WidgetSize>()
        .map_err(|_| QueryError::InvalidSize)?;
    if !widget_type.supports(size) {
        return Err(QueryError::InvalidSize);
    }
    Ok(size)
}

pub fn calendar_query(params: &HashMap<String, String>) -> Result<WidgetSize, QueryError> {
    widget_size(params, WidgetType::NotionCalendar)
}

pub fn forecast_query(params: &HashMap<String, String>) -> Result<ForecastRequest, QueryError> {
    let size = widget_size(params, WidgetType::WeatherForecast)?;

    let (Some(location_name), Some(latitude), Some(longitude)) = (
        param(params, "location_name"),
        param(params, "location_latitude"),
        param(params, "location_longitude"),
    ) else {
        return Err(QueryError::MissingLocation);
    };
    let amedas_code = param(params, "location_histdata").map(str::to_string);
    if size == WidgetSize::MiddleV && amedas_code.is_none() {
        return Err(QueryError::MissingAmedasCode);
    }

    Ok(ForecastRequest {
        size,
        location_name: location_name.to_string(),
        latitude: latitude
            .parse()
            .map_err(|_| QueryError::InvalidLatitude)?,
        longitude: longitude
            .parse()
            .map_err(|_| QueryError::InvalidLongitude)?,
        amedas_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn calendar_size_is_required_and_checked() {
        assert_eq!(calendar_query(&params(&[])), Err(QueryError::MissingSize));
        assert_eq!(
            calendar_query(&params(&[("size", "small")])),
            Err(QueryError::InvalidSize)
        );
        assert_eq!(
            calendar_query(&params(&[("size", "longv")])),
            Ok(WidgetSize::LongV)
        );
    }

    #[test]
    fn forecast_needs_full_location() {
        let err = forecast_query(&params(&[("size", "small"), ("location_name", "Tokyo")]))
            .unwrap_err();
        assert_eq!(err, QueryError::MissingLocation);
    }

    #[test]
    fn middlev_forecast_needs_amedas_code() {
        let err = forecast_query(&params(&[
            ("size", "middlev"),
            ("location_name", "Tokyo"),
            ("location_latitude", "35.68"),
            ("location_longitude", "139.76"),
        ]))
        .unwrap_err();
        assert_eq!(err, QueryError::MissingAmedasCode);
    }

    #[test]
    fn coordinates_must_be_numbers() {
        let err = forecast_query(&params(&[
            ("size", "small"),
            ("location_name", "Tokyo"),
            ("location_latitude", "north"),
            ("location_longitude", "139.76"),
        ]))
        .unwrap_err();
        assert_eq!(err, QueryError::InvalidLatitude);
    }

    #[test]
    fn valid_forecast_query() {
        let request = forecast_query(&params(&[
            ("size", "middlev"),
            ("location_name", "Tokyo"),
            ("location_latitude", "35.68"),
            ("location_longitude", "139.76"),
            ("location_histdata", "44132"),
        ]))
        .unwrap();
        assert_eq!(request.size, WidgetSize::MiddleV);
        assert_eq!(request.latitude, 35.68);
        assert_eq!(request.amedas_code.as_deref(), Some("44132"));
    }
}
