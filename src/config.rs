use std::collections::HashMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com";
pub const DEFAULT_OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_JMA_BASE_URL: &str = "https://www.jma.go.jp";
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
pub const DEFAULT_LAYOUTS_DIR: &str = "layouts";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config line {line}: {content}")]
    Line { line: usize, content: String },
    #[error("invalid value for {key}: {value}")]
    Value { key: &'static str, value: String },
}

/// `KEY=VALUE` pairs read from the file named by `CONFIG_FILE`.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::Line {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Api,
    Cli,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub run_mode: RunMode,
    pub bind_addr: SocketAddr,
    pub notion_api_key: Option<String>,
    pub notion_database_id: Option<String>,
    pub notion_base_url: String,
    pub open_meteo_base_url: String,
    pub jma_base_url: String,
    pub timezone: Tz,
    pub layouts_dir: PathBuf,
    pub http_timeout: Duration,
}

impl Settings {
    /// Config file values win; anything missing falls back to the environment.
    pub fn load(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| config.get(key).or_else(|| env::var(key).ok()))
    }

    pub fn from_lookup<F>(get_prop: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |key: &str, default: &str| get_prop(key).unwrap_or(default.to_string());

        let run_mode = match or_default("RUN_MODE", "api").as_str() {
            "api" => RunMode::Api,
            "cli" => RunMode::Cli,
            other => {
                return Err(ConfigError::Value {
                    key: "RUN_MODE",
                    value: other.to_string(),
                })
            }
        };

        let bind_addr = or_default("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr.parse::<SocketAddr>().map_err(|_| ConfigError::Value {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let timezone = or_default("TIMEZONE", DEFAULT_TIMEZONE);
        let timezone = timezone.parse::<Tz>().map_err(|_| ConfigError::Value {
            key: "TIMEZONE",
            value: timezone.clone(),
        })?;

        let timeout = or_default("HTTP_TIMEOUT_SECS", &DEFAULT_HTTP_TIMEOUT_SECS.to_string());
        let timeout = timeout.parse::<u64>().map_err(|_| ConfigError::Value {
            key: "HTTP_TIMEOUT_SECS",
            value: timeout.clone(),
        })?;

        Ok(Self {
            run_mode,
            bind_addr,
            notion_api_key: get_prop("NOTION_API_KEY").filter(|v| !v.is_empty()),
            notion_database_id: get_prop("NOTION_DATABASE_ID").filter(|v| !v.is_empty()),
            notion_base_url: or_default("NOTION_BASE_URL", DEFAULT_NOTION_BASE_URL),
            open_meteo_base_url: or_default("OPEN_METEO_BASE_URL", DEFAULT_OPEN_METEO_BASE_URL),
            jma_base_url: or_default("JMA_BASE_URL", DEFAULT_JMA_BASE_URL),
            timezone,
            layouts_dir: PathBuf::from(or_default("LAYOUTS_DIR", DEFAULT_LAYOUTS_DIR)),
            http_timeout: Duration::from_secs(timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn parses_exports_comments_and_quotes() {
        let config = AppConfig::parse(
            "# dashboard\nexport NOTION_API_KEY=\"secret\"\nTIMEZONE='UTC'\n\nBIND_ADDR = 127.0.0.1:9000\n",
        )
        .unwrap();
        assert_eq!(config.get("NOTION_API_KEY").as_deref(), Some("secret"));
        assert_eq!(config.get("TIMEZONE").as_deref(), Some("UTC"));
        assert_eq!(config.get("BIND_ADDR").as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(config.get("MISSING"), None);
    }

    #[test]
    fn rejects_lines_without_equals() {
        let err = AppConfig::parse("JUSTAKEY").unwrap_err();
        assert!(matches!(err, ConfigError::Line { line: 1, .. }));
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.run_mode, RunMode::Api);
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.timezone, chrono_tz::Asia::Tokyo);
        assert_eq!(settings.http_timeout, Duration::from_secs(10));
        assert!(settings.notion_api_key.is_none());
    }

    #[test]
    fn invalid_timezone_is_a_config_error() {
        let err = Settings::from_lookup(lookup(&[("TIMEZONE", "Nowhere/Land")])).unwrap_err();
        assert!(matches!(err, ConfigError::Value { key: "TIMEZONE", .. }));
    }

    #[test]
    fn empty_secrets_count_as_missing() {
        let settings = Settings::from_lookup(lookup(&[
            ("NOTION_API_KEY", ""),
            ("NOTION_DATABASE_ID", "db"),
            ("RUN_MODE", "cli"),
        ]))
        .unwrap();
        assert!(settings.notion_api_key.is_none());
        assert_eq!(settings.notion_database_id.as_deref(), Some("db"));
        assert_eq!(settings.run_mode, RunMode::Cli);
    }
}
