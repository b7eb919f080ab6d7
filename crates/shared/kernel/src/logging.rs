//! Bridges [`LogConfig`] to the global subscriber.

use std::str::FromStr;
use toggle_domain::config::{LogConfig, LogFormat};
use toggle_logger::{Format, LevelFilter, Logger, LoggerError};

/// Installs the process-wide logger described by `config`.
///
/// # Errors
/// * [`LoggerError::InvalidConfiguration`] for an unknown level name or invalid filter.
/// * Any error from [`toggle_logger::LoggerBuilder::init`].
pub fn init_logging(name: &str, config: &LogConfig) -> Result<Logger, LoggerError> {
    let mut builder = Logger::builder()
        .name(name)
        .level(parse_level(&config.level)?)
        .format(match config.format {
            LogFormat::Compact => Format::Compact,
            LogFormat::Json => Format::Json,
        });

    if let Some(filter) = &config.filter {
        builder = builder.filter(filter.as_str());
    }
    if let Some(directory) = &config.directory {
        builder = builder.directory(directory.as_path());
    }

    builder.init()
}

/// Accepts `trace`..`error` and `off`, case-insensitive.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim()).map_err(|_| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}'").into(),
        context: None,
    })
}
