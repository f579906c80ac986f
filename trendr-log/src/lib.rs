//! Tracing setup for trendr processes.

use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "trendr.log";

/// Installs the global subscriber: compact stdout output and, when `log_dir`
/// is given, a daily-rolling plain-text log file.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice keeps the first
/// subscriber.
pub fn init_tracing(level: &str, log_dir: Option<&Path>) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(level)?,
    };

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let file_layer = match log_dir {
        Some(dir) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(file_appender(dir)?),
        ),
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

pub fn parse_filter(level: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::try_new(level)?)
}

fn file_appender(dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        assert!(parse_filter("trendr=loud").is_err());
        assert!(parse_filter("info,actix_web=warn").is_ok());
    }

    #[test]
    fn creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("logs");
        file_appender(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn init_with_file_sink_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        init_tracing("debug", Some(dir.path())).unwrap();
        tracing::info!("log sink ready");
    }
}
