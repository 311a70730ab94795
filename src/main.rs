use std::env;
use std::process::ExitCode;

use screensaver::cli;
use screensaver::config::{AppConfig, RunMode, Settings};
use screensaver::logging::{filter_directive, init_logging};
use screensaver::runtime;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path),
        Err(_) => Ok(AppConfig::default()),
    };

    // The config file may carry RUST_LOG too, so logging starts once it is read.
    let directive = match &config {
        Ok(config) => filter_directive(|key| config.get(key).or_else(|| env::var(key).ok())),
        Err(_) => filter_directive(|key| env::var(key).ok()),
    };
    init_logging(&directive);

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "unable to load config file");
            return ExitCode::FAILURE;
        }
    };

    let settings = match Settings::load(&config) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let result = match settings.run_mode {
        RunMode::Api => runtime::run_api(settings).await.map_err(Into::into),
        RunMode::Cli => cli::cli(settings).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "exiting");
            ExitCode::FAILURE
        }
    }
}
