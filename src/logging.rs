use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "nextword.log";
const LOG_ENV: &str = "NEXTWORD_LOG";

pub fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nextword").map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Sends tracing output to `<dir>/nextword.log`; the terminal belongs to the UI.
///
/// The returned guard flushes buffered lines when dropped, so keep it alive
/// until shutdown.
pub fn init_tracing(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("nextword=info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
