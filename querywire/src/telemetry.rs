//! Telemetry and tracing utilities
//!
//! The library itself only emits `tracing` events. These helpers install a
//! subscriber for applications that do not bring their own.
//!
//! ## Example
//!
//! ```rust,ignore
//! use querywire::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "QUERYWIRE_LOG_LEVEL";
/// Environment variable holding the output format.
pub const LOG_FORMAT_ENV: &str = "QUERYWIRE_LOG_FORMAT";
/// Environment variable holding the log file path.
pub const LOG_FILE_ENV: &str = "QUERYWIRE_LOG_FILE";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLevel(String),

    #[error("Invalid log format: {0}. Valid options: text, json, json-compact")]
    InvalidFormat(String),

    #[error("Invalid log file path: {0}")]
    InvalidLogFile(PathBuf),

    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    Json,
    /// JSON with the compact field layout
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(TelemetryError::InvalidFormat(s.to_string())),
        }
    }
}

/// Configuration for tracing subscriber
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write to stderr
    pub enable_console: bool,
    /// Also write to this file (non-blocking)
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// Read `QUERYWIRE_LOG_LEVEL`, `QUERYWIRE_LOG_FORMAT` and `QUERYWIRE_LOG_FILE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            builder = builder.log_level_str(&level)?;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            builder = builder.output_format(format.parse()?);
        }
        if let Some(file) = lookup(LOG_FILE_ENV) {
            builder = builder.log_file(PathBuf::from(file));
        }
        Ok(builder.build())
    }
}

/// Builder for SubscriberConfig
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = match level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => return Err(TelemetryError::InvalidLevel(level.to_string())),
        };
        self.log_level = Some(level);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

fn env_filter(level: tracing::Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("querywire={level},querywire_protocol_query={level}")
}

fn make_writer(config: &SubscriberConfig) -> Result<(BoxMakeWriter, Option<WorkerGuard>)> {
    let Some(path) = &config.log_file else {
        let writer = if config.enable_console {
            BoxMakeWriter::new(std::io::stderr)
        } else {
            BoxMakeWriter::new(std::io::sink)
        };
        return Ok((writer, None));
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| TelemetryError::InvalidLogFile(path.clone()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let writer = if config.enable_console {
        BoxMakeWriter::new(std::io::stderr.and(file_writer))
    } else {
        BoxMakeWriter::new(file_writer)
    };
    Ok((writer, Some(guard)))
}

/// Initialize tracing subscriber with the given configuration
///
/// Returns the file writer's `WorkerGuard` when `log_file` is set; keep it
/// alive for as long as logs should be flushed. An already installed global
/// subscriber is not an error.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config.log_level);
    let with_ansi = config.log_file.is_none();
    let (writer, guard) = make_writer(&config)?;

    let init_result = match config.output_format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .json()
            .flatten_event(true)
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(with_ansi)
            .with_target(true)
            .try_init(),
    };

    match init_result {
        Ok(()) => Ok(guard),
        Err(e) => {
            let error_msg = e.to_string();
            if error_msg.contains("global default trace dispatcher has already been set") {
                Ok(None)
            } else {
                Err(TelemetryError::Init(error_msg))
            }
        }
    }
}

pub fn init_default() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::default())
}

pub fn init_debug() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::debug())
}

/// Initialize from `QUERYWIRE_LOG_*` environment variables.
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::from_env()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn builder_defaults() {
        let config = SubscriberConfig::builder().build();
        assert_eq!(config, SubscriberConfig::default());
        assert_eq!(SubscriberConfig::debug().log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn rejects_unknown_level_and_format() {
        assert!(matches!(
            SubscriberConfig::builder().log_level_str("loud"),
            Err(TelemetryError::InvalidLevel(_))
        ));
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(TelemetryError::InvalidFormat(_))
        ));
    }

    #[test]
    fn reads_environment_lookup() {
        let vars: HashMap<&str, &str> = [
            (LOG_LEVEL_ENV, "DEBUG"),
            (LOG_FORMAT_ENV, "json-compact"),
            (LOG_FILE_ENV, "/tmp/querywire.log"),
        ]
        .into_iter()
        .collect();
        let config =
            SubscriberConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.output_format, OutputFormat::JsonCompact);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/querywire.log")));
    }

    #[test]
    fn filter_targets_workspace_crates() {
        assert_eq!(
            env_filter(tracing::Level::WARN),
            "querywire=warn,querywire_protocol_query=warn"
        );
    }
}
