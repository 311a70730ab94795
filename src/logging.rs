use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";
pub const LOG_FILTER_KEY: &str = "RUST_LOG";

/// Filter directive from `RUST_LOG`, looked up the same way as every other setting.
pub fn filter_directive<F>(get_prop: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_prop(LOG_FILTER_KEY)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("invalid log filter {:?} ({}), using {}", directive, err, DEFAULT_FILTER);
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Installs the global subscriber.
pub fn init_logging(directive: &str) {
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_target(true)
        .try_init()
    {
        // Already installed, e.g. by a test harness.
        tracing::debug!(error = %err, "tracing subscriber not installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn config_file_filter_wins_over_environment() {
        let config = AppConfig::parse("RUST_LOG=screensaver=debug\n").unwrap();
        let directive = filter_directive(|key| config.get(key).or_else(|| Some("warn".to_string())));
        assert_eq!(directive, "screensaver=debug");
    }

    #[test]
    fn missing_or_blank_filter_uses_default() {
        assert_eq!(filter_directive(|_| None), DEFAULT_FILTER);
        assert_eq!(filter_directive(|_| Some("  ".to_string())), DEFAULT_FILTER);
    }

    #[test]
    fn invalid_directive_falls_back() {
        assert_eq!(
            build_filter("screensaver=loud").max_level_hint(),
            Some(LevelFilter::INFO)
        );
        assert_eq!(
            build_filter("screensaver=debug").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
