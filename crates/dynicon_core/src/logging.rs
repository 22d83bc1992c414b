//! Logging setup for Dynicon.
//!
//! The subscriber is configured from [`DemoConfig`]:
//! - `log_filter` from the config wins over `DYNICON_LOG` and `RUST_LOG`
//! - On a terminal everything goes to the console
//! - Otherwise a daily log file under the data directory, mirrored to stdout at INFO
//! - If the log file cannot be created, console only

use crate::config::DemoConfig;
use crate::error::IconError;

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "dynicon";

/// Crates whose events the default filter lets through at full verbosity.
const CRATES: [&str; 3] = ["dynicon", "dynicon_core", "dynicon_ui"];

/// Environment variables consulted when the config sets no filter, in order.
const FILTER_VARS: [&str; 2] = ["DYNICON_LOG", "RUST_LOG"];

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Console only.
    Console,
    /// Daily files in this directory, plus INFO and above on stdout.
    File(PathBuf),
}

/// Where the active filter came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSource {
    /// `log_filter` in the config.
    Config,
    /// The named environment variable.
    Env(&'static str),
    /// The build-type default.
    Default,
    /// The config filter did not parse; the default is used instead.
    InvalidConfig(String),
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output destination.
    pub sink: LogSink,
    /// Filter overriding the environment.
    pub log_filter: Option<String>,
}

impl LogConfig {
    /// Derive logging settings from the demo config and the current stdout.
    pub fn from_config(config: &DemoConfig) -> Self {
        Self::for_output(config, atty::is(atty::Stream::Stdout))
    }

    fn for_output(config: &DemoConfig, is_terminal: bool) -> Self {
        let sink = if is_terminal { LogSink::Console } else { LogSink::File(log_dir()) };
        Self { sink, log_filter: config.log_filter.clone() }
    }
}

/// Keeps the file writer alive; dropping it flushes pending entries.
pub struct LoggingGuard {
    sink: LogSink,
    filter: FilterSource,
    _worker_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// The sink that was actually installed.
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Where the active filter came from.
    pub fn filter_source(&self) -> &FilterSource {
        &self.filter
    }

    /// Log the chosen sink and filter, warning about an ignored config filter.
    pub fn report(&self) {
        if let FilterSource::InvalidConfig(filter) = &self.filter {
            tracing::warn!(filter = %filter, "Ignoring invalid log_filter from config");
        } else {
            tracing::debug!(source = ?self.filter, "Log filter selected");
        }
        if let LogSink::File(dir) = &self.sink {
            tracing::info!(dir = %dir.display(), "Writing log files");
        }
    }
}

/// Install the global subscriber.
///
/// Must be called once, before anything logs.
pub fn init_logging(config: LogConfig) -> LoggingGuard {
    let (filter, source) = resolve_filter(config.log_filter.as_deref());

    if let LogSink::File(dir) = &config.sink {
        match file_writer(dir) {
            Ok((file, worker_guard)) => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stdout.with_max_level(tracing::Level::INFO).and(file))
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_target(true)
                    .init();
                return LoggingGuard {
                    sink: LogSink::File(dir.clone()),
                    filter: source,
                    _worker_guard: Some(worker_guard),
                };
            }
            Err(e) => eprintln!("Warning: {e}. Logging to console only."),
        }
    }

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    LoggingGuard { sink: LogSink::Console, filter: source, _worker_guard: None }
}

fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard), IconError> {
    std::fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .map_err(|e| IconError::Io {
            message: format!("Cannot create log file in '{}': {e}", dir.display()),
            source: Some(Box::new(e)),
        })?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Pick the filter: config, then `DYNICON_LOG`, then `RUST_LOG`, then the default.
fn resolve_filter(configured: Option<&str>) -> (EnvFilter, FilterSource) {
    if let Some(filter) = configured {
        return match EnvFilter::try_new(filter) {
            Ok(parsed) => (parsed, FilterSource::Config),
            Err(_) => (default_filter(), FilterSource::InvalidConfig(filter.to_string())),
        };
    }

    for var in FILTER_VARS {
        if let Ok(parsed) = EnvFilter::try_from_env(var) {
            return (parsed, FilterSource::Env(var));
        }
    }
    (default_filter(), FilterSource::Default)
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(default_log_filter())
}

/// Default filter: other crates at WARN, ours at TRACE (debug) or INFO (release).
pub fn default_log_filter() -> String {
    let level = if cfg!(debug_assertions) { "trace" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Directory holding the daily log files.
pub fn log_dir() -> PathBuf {
    crate::config::default_data_dir().join("logs")
}
