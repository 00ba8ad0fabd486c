//! Logging init: file under XDG state dir, or stderr when that is not possible.

use anyhow::Result;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,ytdrop=debug,ytdrop_core=debug";
const LOG_FILE_NAME: &str = "ytdrop.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Create `dir` if needed and open the log file in it for appending.
fn open_log_file(dir: &Path) -> Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Log to `~/.local/state/ytdrop/ytdrop.log`.
/// Errors when there is no usable state dir (no HOME in a container, say);
/// the caller then uses [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let state_dir = xdg::BaseDirectories::with_prefix("ytdrop")?.get_state_home();
    let (file, log_file_path) = open_log_file(&state_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::info!("ytdrop logging initialized at {}", log_file_path.display());
    Ok(log_file_path)
}

/// Log to stderr only.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
