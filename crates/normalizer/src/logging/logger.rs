// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "ton-normalizer.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),
}

/// Where and how the normalizer writes its diagnostics.
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub json_format: bool,
    pub strip_ansi: bool,
    pub write_to_file: bool,
    pub write_path: &'a str,
    pub write_max_file_size: u64,
    pub write_max_files: usize,
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

/// Size-rotated `ton-normalizer.log` under `write_path`, written off the calling thread.
///
/// `write_max_files` counts the live file, so `ton-normalizer.log.1` onwards
/// hold at most `write_max_files - 1` older segments.
fn file_writer(config: &LoggingConfig) -> Result<NonBlocking, LoggingError> {
    std::fs::create_dir_all(config.write_path)?;

    let appender = BasicRollingFileAppender::new(
        PathBuf::from(config.write_path).join(LOG_FILE_NAME),
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        config.write_max_files.saturating_sub(1),
    )?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // flushes on drop; the CLI logs until exit
    std::mem::forget(guard);
    Ok(writer)
}

fn text_layer<W>(writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(ansi)
        .with_writer(writer)
        .boxed()
}

fn json_layer<W>(writer: W) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer().json().with_writer(writer).boxed()
}

/// Install the global subscriber.
///
/// Records always go to stderr, leaving stdout to the normalized JSON the CLI
/// prints. With `write_to_file` the same records are also appended to a
/// rotated file, never with ANSI colours.
///
/// # Examples
/// ```no_run
/// use ton_normalizer::logging::{self, LoggingConfig};
///
/// logging::init_with_config(LoggingConfig {
///     level: "ton_normalizer=debug",
///     json_format: false,
///     strip_ansi: false,
///     write_to_file: true,
///     write_path: "./logs",
///     write_max_file_size: 5242880,
///     write_max_files: 5,
/// })?;
/// # Ok::<(), ton_normalizer::logging::LoggingError>(())
/// ```
pub fn init_with_config(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config.level)?;

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    if config.json_format {
        layers.push(json_layer(std::io::stderr));
    } else {
        layers.push(text_layer(std::io::stderr, !config.strip_ansi));
    }

    if config.write_to_file {
        let writer = file_writer(&config)?;
        if config.json_format {
            layers.push(json_layer(writer));
        } else {
            layers.push(text_layer(writer, false));
        }
    }

    tracing_subscriber::registry().with(layers).with(filter).init();
    Ok(())
}
