//! Interview Timer: timed interview-answer practice in the terminal.

mod app;
mod app_command;
mod config;
mod error;
mod view;

pub(crate) use {
    app::App,
    app_command::{AppCommand, DeckCommand, DeckRef, SettingChange},
    error::{AppError, Result as AppResult},
};

use crate::config::{Config, LoggingConfig};

use interview_timer_core::{JsonFileStore, MicrophoneRecorder, NullRecorder, Recorder};

use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    let config = Config::load();

    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let store = match JsonFileStore::open(&config.storage.data_dir) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open data directory: {:?}", e);
            std::process::exit(1);
        }
    };
    info!(data_dir = ?store.dir(), "Practice data directory ready");

    // The device is only opened when a run asks for audio.
    let recorder: Box<dyn Recorder> = if config.audio.enabled {
        Box::new(MicrophoneRecorder::new(config.audio.max_recording_seconds))
    } else {
        Box::new(NullRecorder)
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    // block_on keeps the app on this thread; the recorder's stream is !Send.
    let app = App::new(store, recorder, std::io::stdout(), config.audio.enabled);
    if let Err(e) = rt.block_on(app.run()) {
        error!(error = ?e, "App error");
    }

    // The stdin reader may still be blocked in read().
    rt.shutdown_timeout(Duration::from_millis(100));
}

/// Logs go to stderr so stdout stays the practice screen. `RUST_LOG` wins
/// over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
