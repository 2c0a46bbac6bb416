//! Logging setup: a stderr console layer plus an optional rolling log file.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const APP_NAME: &str = "reading-level";
const LOG_FILE_PREFIX: &str = "reading-level.log";
const ENV_LOG_DIR: &str = "READING_LEVEL_LOG_DIR";

/// Default console level when nothing else is requested. Stdout carries the
/// reports, so the console only shows problems unless asked.
const CONSOLE_DEFAULT_LEVEL: &str = "warn";

/// Where logs go.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Directory for the rolling log file; `None` disables the file sink.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log directory: environment first, then the configured
    /// directory, then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_dir = std::env::var_os(ENV_LOG_DIR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or(config_log_dir)
            .or_else(default_log_dir);
        Self { log_dir }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Some(dirs.data_local_dir().join("logs"))
}

/// Build a filter from the CLI verbosity flags.
///
/// `-q` wins over everything, `-v`/`-vv` come next, then `RUST_LOG`, then
/// `default_level`.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber.
///
/// The console layer writes to stderr filtered by the CLI flags. The file
/// layer, when a log directory is usable, uses `file_filter`. Keep the
/// returned guard alive for the life of the process so buffered lines are
/// flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    quiet: bool,
    verbose: u8,
    file_filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(env_filter(quiet, verbose, CONSOLE_DEFAULT_LEVEL));

    let mut file_warning = None;
    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(file_filter);
                (Some(layer), Some(guard))
            }
            Err(err) => {
                file_warning = Some(format!("{}: {err}", dir.display()));
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(warning) = file_warning {
        tracing::warn!(reason = %warning, "file logging disabled");
    }
    Ok(guard)
}
