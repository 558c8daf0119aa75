//! `env_logger` setup for binaries and tests embedding the solver.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Line layout of log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `LEVEL message`
    #[default]
    Compact,
    /// `LEVEL [target] message`
    Pretty,
}

/// Logger settings.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Most verbose level emitted.
    pub level: LevelFilter,
    /// Record layout.
    pub format: LogFormat,
    /// Prefix records with a millisecond timestamp.
    pub timestamp: bool,
    /// Write to this file instead of stderr.
    pub output: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            format: LogFormat::Compact,
            timestamp: false,
            output: None,
        }
    }
}

/// Installs the global logger.
///
/// # Errors
///
/// [`ConfigError::InvalidSetting`] if the output file cannot be created or a
/// logger is already installed.
pub fn init_logger(options: &LogOptions) -> Result<()> {
    let format = options.format;
    let timestamp = options.timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.level)
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            match format {
                LogFormat::Compact => writeln!(buf, "{} {}", level_tag(record.level()), record.args()),
                LogFormat::Pretty => writeln!(
                    buf,
                    "{} [{}] {}",
                    level_tag(record.level()),
                    record.target(),
                    record.args()
                ),
            }
        });

    if let Some(path) = &options.output {
        let file = File::create(path).map_err(|e| {
            ConfigError::InvalidSetting(format!(
                "failed to create log output file {}: {e}",
                path.display()
            ))
        })?;
        builder.target(Target::Pipe(Box::new(file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| ConfigError::InvalidSetting(format!("logger init failed: {e}")).into())
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;

    #[test]
    fn test_level_tags() {
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }

    #[test]
    fn test_unwritable_output() {
        let options = LogOptions {
            output: Some(PathBuf::from("/nonexistent-dir/solver.log")),
            ..LogOptions::default()
        };
        assert!(matches!(
            init_logger(&options),
            Err(TspError::Config(ConfigError::InvalidSetting(_)))
        ));
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_logger(&LogOptions::default());
        assert!(init_logger(&LogOptions::default()).is_err());
    }
}
