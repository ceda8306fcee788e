use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install logger: {source}")]
    Install {
        #[source]
        source: log::SetLoggerError,
    },
}

/// Initialize logging with fern.
///
/// Logs to stdout, or to `log_file` when one is given.
pub fn initialize(
    log_level: cm_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> Result<(), LoggerError> {
    let base_dispatch = Dispatch::new().level(log_level.into());

    let dispatch = if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::OpenLogFile { path, source: e })?;

        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} - {}] {} [{}:{}]",
                    humantime::format_rfc3339(SystemTime::now()),
                    record.level(),
                    message,
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                ))
            })
            .chain(file)
    } else if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{} - {}] {} [{}:{}]",
                    humantime::format_rfc3339(SystemTime::now()),
                    colors.color(record.level()),
                    message,
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                ))
            })
            .chain(std::io::stdout())
    } else {
        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} - {}] {} [{}:{}]",
                    humantime::format_rfc3339(SystemTime::now()),
                    record.level(),
                    message,
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                ))
            })
            .chain(std::io::stdout())
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| LoggerError::Install { source: e })?;

    tracing_log::LogTracer::init().ok();

    info!("Logger initialized");

    Ok(())
}
