//! Logging bootstrap for the comic shelf.
//!
//! Installs a `tracing` subscriber with two sinks: a daily-rolling file under the application
//! data directory and a stderr console. Records emitted through the `log` facade are bridged in.
//! Call [`init`] once at startup; later calls hand back the handle from the first call.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing_log::AsLog;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, util::SubscriberInitExt};

const FILTER_ENV_VARS: [&str; 2] = ["COMIC_SHELF_LOG", "RUST_LOG"];

static LOG_HANDLE: OnceLock<LogHandle> = OnceLock::new();

pub use tracing_subscriber::filter::LevelFilter as LogLevel;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogRolling {
    Hourly,
    Daily,
    Never,
}

impl LogRolling {
    fn rotation(self) -> tracing_appender::rolling::Rotation {
        match self {
            LogRolling::Hourly => tracing_appender::rolling::Rotation::HOURLY,
            LogRolling::Daily => tracing_appender::rolling::Rotation::DAILY,
            LogRolling::Never => tracing_appender::rolling::Rotation::NEVER,
        }
    }
}

/// Logging sinks and levels.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory holding the rolled `<prefix>.*.log` files.
    pub directory: PathBuf,
    pub file_prefix: String,
    /// Rolled files to keep; `None` keeps everything.
    pub retention: Option<usize>,
    pub file_level: LevelFilter,
    pub console_level: LevelFilter,
    /// Forward `log` crate records into `tracing`.
    pub capture_log: bool,
    /// Filter directive such as `shelf_core=debug`; falls back to the env vars.
    pub env_filter: Option<String>,
    pub rolling: LogRolling,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file_prefix: "shelf".to_string(),
            retention: Some(14),
            file_level: LevelFilter::DEBUG,
            console_level: LevelFilter::WARN,
            capture_log: true,
            env_filter: filter_from_env(),
            rolling: LogRolling::Daily,
        }
    }
}

impl LogConfig {
    pub fn with_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.directory = path.into();
        self
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_console_level(mut self, level: LevelFilter) -> Self {
        self.console_level = level;
        self
    }
}

/// Keeps the non-blocking file writer alive for the life of the process.
#[derive(Debug)]
pub struct LogHandle {
    _guard: tracing_appender::non_blocking::WorkerGuard,
    directory: PathBuf,
}

impl LogHandle {
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Install the global subscriber. The first successful call wins.
pub fn init(config: LogConfig) -> Result<&'static LogHandle> {
    if let Some(handle) = LOG_HANDLE.get() {
        return Ok(handle);
    }

    let handle = install(config)?;
    Ok(LOG_HANDLE.get_or_init(|| handle))
}

fn install(config: LogConfig) -> Result<LogHandle> {
    if config.capture_log {
        let max = config.file_level.max(config.console_level);
        let _ = tracing_log::LogTracer::builder().with_max_level(max.as_log()).init();
    }

    fs::create_dir_all(&config.directory)
        .with_context(|| format!("creating log directory at {}", config.directory.display()))?;

    if let Some(retention) = config.retention.filter(|r| *r > 0) {
        prune_old_logs(&config.directory, &config.file_prefix, retention)
            .context("applying log retention policy")?;
    }

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(config.rolling.rotation())
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .build(&config.directory)
        .context("creating rolling log appender")?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let directive = config
        .env_filter
        .or_else(filter_from_env)
        .unwrap_or_else(|| if cfg!(debug_assertions) { "debug" } else { "info" }.to_string());
    let env_filter = EnvFilter::try_new(directive).context("parsing env filter directive")?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer)
        .with_file(true)
        .with_line_number(true)
        .with_filter(config.file_level);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(config.console_level);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    Ok(LogHandle { _guard: guard, directory: config.directory })
}

fn filter_from_env() -> Option<String> {
    FILTER_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .filter(|directive| !directive.trim().is_empty())
}

/// Delete the oldest files starting with `prefix` until at most `retention` remain.
fn prune_old_logs(dir: &Path, prefix: &str, retention: usize) -> Result<()> {
    let mut logs: Vec<(PathBuf, SystemTime)> = fs::read_dir(dir)
        .with_context(|| format!("reading log directory at {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let meta = entry.metadata().ok().filter(|meta| meta.is_file())?;
            let path = entry.path();
            if !has_prefix(&path, prefix) {
                return None;
            }
            Some((path, meta.modified().unwrap_or(SystemTime::UNIX_EPOCH)))
        })
        .collect();

    if logs.len() <= retention {
        return Ok(());
    }

    logs.sort_by_key(|(_, modified)| *modified);
    let excess = logs.len() - retention;
    for (path, _) in logs.into_iter().take(excess) {
        let _ = fs::remove_file(&path);
    }
    Ok(())
}

fn has_prefix(path: &Path, prefix: &str) -> bool {
    path.file_name().and_then(OsStr::to_str).map(|name| name.starts_with(prefix)).unwrap_or(false)
}

fn default_log_directory() -> PathBuf {
    match directories::ProjectDirs::from("com", "ComicShelf", "comic-shelf") {
        Some(dirs) => dirs.data_dir().join("logs"),
        None => std::env::temp_dir().join("comic-shelf-logs"),
    }
}
