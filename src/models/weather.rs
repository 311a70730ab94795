use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// WMO weather interpretation codes as reported by Open-Meteo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCode {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    DepositingRimeFog,
    DrizzleLight,
    DrizzleModerate,
    DrizzleDense,
    FreezingDrizzleLight,
    FreezingDrizzleDense,
    RainSlight,
    RainModerate,
    RainHeavy,
    FreezingRainLight,
    FreezingRainHeavy,
    SnowFallSlight,
    SnowFallModerate,
    SnowFallHeavy,
    SnowGrains,
    RainShowersSlight,
    RainShowersModerate,
    RainShowersViolent,
    SnowShowersSlight,
    SnowShowersHeavy,
    ThunderstormSlightOrModerate,
    ThunderstormWithSlightHail,
    ThunderstormWithHeavyHail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Jp,
}

pub const DEFAULT_LANG: Lang = Lang::En;

impl WeatherCode {
    pub fn from_code(code: i64) -> Option<Self> {
        use WeatherCode::*;
        let code = match code {
            0 => ClearSky,
            1 => MainlyClear,
            2 => PartlyCloudy,
            3 => Overcast,
            45 => Fog,
            48 => DepositingRimeFog,
            51 => DrizzleLight,
            53 => DrizzleModerate,
            55 => DrizzleDense,
            56 => FreezingDrizzleLight,
            57 => FreezingDrizzleDense,
            61 => RainSlight,
            63 => RainModerate,
            65 => RainHeavy,
            66 => FreezingRainLight,
            67 => FreezingRainHeavy,
            71 => SnowFallSlight,
            73 => SnowFallModerate,
            75 => SnowFallHeavy,
            77 => SnowGrains,
            80 => RainShowersSlight,
            81 => RainShowersModerate,
            82 => RainShowersViolent,
            85 => SnowShowersSlight,
            86 => SnowShowersHeavy,
            95 => ThunderstormSlightOrModerate,
            96 => ThunderstormWithSlightHail,
            99 => ThunderstormWithHeavyHail,
            _ => return None,
        };
        Some(code)
    }

    /// Material Symbols icon name.
    pub fn icon(self) -> &'static str {
        use WeatherCode::*;
        match self {
            ClearSky | MainlyClear => "clear_day",
            PartlyCloudy => "partly_cloudy_day",
            Overcast => "cloud",
            Fog | DepositingRimeFog => "foggy",
            DrizzleLight | DrizzleModerate | DrizzleDense => "mist",
            FreezingDrizzleLight | FreezingDrizzleDense => "weather_mix",
            RainSlight | RainModerate => "rainy_light",
            RainHeavy => "rainy_heavy",
            FreezingRainLight | FreezingRainHeavy => "rainy_snow",
            SnowFallSlight | SnowFallModerate => "weather_snowy",
            SnowFallHeavy | SnowGrains => "snowing_heavy",
            RainShowersSlight | RainShowersModerate => "rainy_light",
            RainShowersViolent => "rainy_heavy",
            SnowShowersSlight => "snowing",
            SnowShowersHeavy => "snowing_heavy",
            ThunderstormSlightOrModerate | ThunderstormWithSlightHail | ThunderstormWithHeavyHail => {
                "thunderstorm"
            }
        }
    }

    pub fn description(self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.description_en(),
            Lang::Jp => self.description_jp(),
        }
    }

    fn description_en(self) -> &'static str {
        use WeatherCode::*;
        match self {
            ClearSky => "Clear Sky",
            MainlyClear => "Mainly Clear",
            PartlyCloudy => "Partly Cloudy",
            Overcast => "Overcast",
            Fog => "Fog",
            DepositingRimeFog => "Depositing Rime Fog",
            DrizzleLight => "Light Drizzle",
            DrizzleModerate => "Moderate Drizzle",
            DrizzleDense => "Dense Drizzle",
            FreezingDrizzleLight => "Light Freezing Drizzle",
            FreezingDrizzleDense => "Dense Freezing Drizzle",
            RainSlight => "Light Rain",
            RainModerate => "Moderate Rain",
            RainHeavy => "Heavy Rain",
            FreezingRainLight => "Light Freezing Rain",
            FreezingRainHeavy => "Heavy Freezing Rain",
            SnowFallSlight => "Light Snowfall",
            SnowFallModerate => "Moderate Snowfall",
            SnowFallHeavy => "Heavy Snowfall",
            SnowGrains => "Snow Grains",
            RainShowersSlight => "Light Rain Showers",
            RainShowersModerate => "Moderate Rain Showers",
            RainShowersViolent => "Violent Rain Showers",
            SnowShowersSlight => "Light Snow Showers",
            SnowShowersHeavy => "Heavy Snow Showers",
            ThunderstormSlightOrModerate => "Slight or Moderate Thunderstorm",
            ThunderstormWithSlightHail => "Thunderstorm with Light Hail",
            ThunderstormWithHeavyHail => "Thunderstorm with Heavy Hail",
        }
    }

    fn description_jp(self) -> &'static str {
        use WeatherCode::*;
        match self {
            ClearSky => "晴天",
            MainlyClear => "主に晴れ",
            PartlyCloudy => "部分的に曇り",
            Overcast => "曇り",
            Fog => "霧",
            DepositingRimeFog => "霧氷",
            DrizzleLight => "小雨",
            DrizzleModerate => "中程度の雨",
            DrizzleDense => "濃雨",
            FreezingDrizzleLight => "弱い着氷性霧雨",
            FreezingDrizzleDense => "濃い着氷性霧雨",
            RainSlight => "小雨",
            RainModerate => "中程度の雨",
            RainHeavy => "大雨",
            FreezingRainLight => "弱い着氷性雨",
            FreezingRainHeavy => "強い着氷性雨",
            SnowFallSlight => "小雪",
            SnowFallModerate => "中程度の雪",
            SnowFallHeavy => "大雪",
            SnowGrains => "雪粒",
            RainShowersSlight => "小雨のにわか雨",
            RainShowersModerate => "中雨のにわか雨",
            RainShowersViolent => "激しいにわか雨",
            SnowShowersSlight => "小雪のにわか雪",
            SnowShowersHeavy => "大雪のにわか雪",
            ThunderstormSlightOrModerate => "雷雨",
            ThunderstormWithSlightHail => "弱いひょうを伴う雷雨",
            ThunderstormWithHeavyHail => "強いひょうを伴う雷雨",
        }
    }
}

// Unknown codes render with an empty icon and name.
pub fn icon_for(code: i64) -> &'static str {
    WeatherCode::from_code(code).map_or("", WeatherCode::icon)
}

pub fn description_for(code: i64, lang: Lang) -> &'static str {
    WeatherCode::from_code(code).map_or("", |code| code.description(lang))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCurrentData {
    pub temperature_2m: f64,
    pub weather_code: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHourlyData {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub weather_code: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDailyData {
    pub time: Vec<String>,
    pub weather_code: Vec<i64>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawForecastData {
    pub timezone: String,
    pub current: RawCurrentData,
    pub hourly: RawHourlyData,
    pub daily: RawDailyData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentData {
    pub temp: String,
    pub weather_icon: String,
    pub weather_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyData {
    pub time: String,
    pub temp: String,
    pub weather_icon: String,
    pub weather_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyData {
    pub time: String,
    pub temp_max: String,
    pub temp_min: String,
    pub weather_icon: String,
    pub weather_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub current: CurrentData,
    pub hourly: Vec<HourlyData>,
    pub daily: Vec<DailyData>,
}

/// One AMeDAS observation: each measurement is `[value, quality flag]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHistoricalData {
    #[serde(default)]
    pub temp: Option<[Option<f64>; 2]>,
    #[serde(default)]
    pub humidity: Option<[Option<f64>; 2]>,
    #[serde(default)]
    pub weather: Option<[Option<i64>; 2]>,
    #[serde(default)]
    pub precipitation10m: Option<[Option<f64>; 2]>,
    #[serde(default)]
    pub wind: Option<[Option<f64>; 2]>,
    #[serde(rename = "windDirection", default)]
    pub wind_direction: Option<[Option<i64>; 2]>,
    #[serde(rename = "normalPressure", default)]
    pub normal_pressure: Option<[Option<f64>; 2]>,
}

/// Keyed by `YYYYMMDDHHMMSS`.
pub type RawHistoricalDataMap = HashMap<String, RawHistoricalData>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalData {
    pub timestamp: i64,
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub weather: Option<i64>,
    pub precipitation10m: Option<f64>,
    pub wind: Option<f64>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<i64>,
    #[serde(rename = "normalPressure")]
    pub normal_pressure: Option<f64>,
}
