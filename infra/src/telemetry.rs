//! Tracing subscriber setup

use dm_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

use crate::InfrastructureError;

/// Build the filter: `RUST_LOG` wins, else the configured directive
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.filter_directive()))
}

macro_rules! install {
    ($builder:expr, $timestamp:expr) => {
        if $timestamp {
            $builder.try_init()
        } else {
            $builder.without_time().try_init()
        }
    };
}

/// Install the global subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let builder = fmt()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => install!(builder.json(), config.timestamp),
        LogFormat::Pretty => install!(builder.pretty(), config.timestamp),
        LogFormat::Compact => install!(builder.compact(), config.timestamp),
    };
    result.map_err(|e| InfrastructureError::Config(format!("tracing already initialized: {e}")))
}
