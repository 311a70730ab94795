use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    Small,
    MiddleH,
    MiddleV,
    Large,
    LongH,
    LongV,
}

impl WidgetSize {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetSize::Small => "small",
            WidgetSize::MiddleH => "middleh",
            WidgetSize::MiddleV => "middlev",
            WidgetSize::Large => "large",
            WidgetSize::LongH => "longh",
            WidgetSize::LongV => "longv",
        }
    }

    /// Grid span as `(rows, cols)`.
    pub fn span(self) -> (u32, u32) {
        match self {
            WidgetSize::Small => (1, 1),
            WidgetSize::MiddleV => (2, 1),
            WidgetSize::MiddleH => (1, 2),
            WidgetSize::Large => (2, 2),
            WidgetSize::LongH => (1, 4),
            WidgetSize::LongV => (4, 1),
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(WidgetSize::Small),
            "middleh" => Ok(WidgetSize::MiddleH),
            "middlev" => Ok(WidgetSize::MiddleV),
            "large" => Ok(WidgetSize::Large),
            "longh" => Ok(WidgetSize::LongH),
            "longv" => Ok(WidgetSize::LongV),
            other => Err(format!("unknown widget size {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    WeatherForecast,
    NotionCalendar,
    Clock,
}

impl WidgetType {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetType::WeatherForecast => "weatherforecast",
            WidgetType::NotionCalendar => "notioncalendar",
            WidgetType::Clock => "clock",
        }
    }

    pub fn supported_sizes(self) -> &'static [WidgetSize] {
        match self {
            WidgetType::WeatherForecast => &[WidgetSize::Small, WidgetSize::MiddleV],
            WidgetType::NotionCalendar => {
                &[WidgetSize::MiddleV, WidgetSize::LongV, WidgetSize::MiddleH]
            }
            WidgetType::Clock => &[WidgetSize::MiddleH],
        }
    }

    pub fn supports(self, size: WidgetSize) -> bool {
        self.supported_sizes().contains(&size)
    }

    // The clock ticks client side; everything else can be refreshed.
    pub fn shows_update_button(self) -> bool {
        !matches!(self, WidgetType::Clock)
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub size: WidgetSize,
    pub row: i64,
    pub col: i64,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Widget {
    pub fn id(&self) -> String {
        format!("wg-{}-r{}-c{}", self.widget_type, self.row, self.col)
    }

    pub fn data_check(&self) -> bool {
        match self.widget_type {
            WidgetType::WeatherForecast => {
                self.data.get("location_name").is_some_and(Value::is_string)
                    && self.data.get("location_latitude").is_some_and(Value::is_number)
                    && self.data.get("location_longitude").is_some_and(Value::is_number)
            }
            WidgetType::NotionCalendar | WidgetType::Clock => true,
        }
    }

    /// Form-encoded query string the page sends back to the widget's API endpoint.
    pub fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("size", self.size.as_str());
        for (key, value) in &self.data {
            match value {
                Value::String(text) => query.append_pair(key, text),
                other => query.append_pair(key, &other.to_string()),
            };
        }
        query.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub name: String,
    pub rows: u32,
    pub cols: u32,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}
