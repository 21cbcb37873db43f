//! Logging setup.
//!
//! Diagnostics go to `$XDG_STATE_HOME/assetpull/assetpull.log`. Stdout carries
//! the progress report, so warnings and errors are also mirrored to stderr
//! where a redirected run still shows them.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{Level, Metadata};
use tracing_subscriber::filter::{filter_fn, EnvFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const DEFAULT_FILTER: &str = "info,assetpull=debug,assetpull_core=debug";

/// Per-item outcomes already reach the console through run events.
const RUNNER_TARGET: &str = "assetpull_core::runner";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn mirror_to_stderr(level: Level, target: &str) -> bool {
    level <= Level::WARN && target != RUNNER_TARGET
}

/// `$XDG_STATE_HOME/assetpull/assetpull.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetpull")?;
    Ok(xdg_dirs
        .get_state_home()
        .join("assetpull")
        .join("assetpull.log"))
}

/// File log plus stderr mirror for warnings. Returns the log file path.
///
/// Errors when the log file cannot be opened or a subscriber is already
/// installed; the caller falls back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log dir {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_filter(env_filter());
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(filter_fn(|meta: &Metadata<'_>| {
            mirror_to_stderr(*meta.level(), meta.target())
        }));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("logging already initialized")?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(path)
}

/// Everything to stderr, filtered as the file log would be.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
