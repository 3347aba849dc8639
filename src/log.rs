use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::prelude::*;

use crate::config::{self, LOG_FILE_NAME};

/// Installs the global subscriber. Logs go to a JSON file because stdout
/// carries the protocol stream.
pub fn init() -> anyhow::Result<()> {
    let log_file = file_appender(&config::data_dir())?;

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(log_file)
        .fmt_fields(JsonFields::default());

    // Use RUST_LOG if set, otherwise default to INFO
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .try_init()?;

    Ok(())
}

fn file_appender(data_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(data_dir).inspect_err(|e| {
        eprintln!("Failed to create data directory {:?}: {}", data_dir, e);
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(data_dir)
        .inspect_err(|e| {
            eprintln!("Failed to open log file in {:?}: {}", data_dir, e);
        })?;

    Ok(appender)
}
