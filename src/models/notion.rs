use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const NAME_PROPERTY: &str = "名前";
pub const DATE_PROPERTY: &str = "日付";
pub const CATEGORY_PROPERTY: &str = "カテゴリ";
pub const EVENT_CATEGORY: &str = "EV";

// Only the parts of the Notion database query response that the calendar reads.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQueryResponse {
    pub object: String,
    #[serde(default)]
    pub results: Vec<RawQueryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQueryResult {
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichText>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<SelectValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectValue {
    pub name: String,
    #[serde(default)]
    pub color: String,
}
