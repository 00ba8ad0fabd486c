//! Runs the external downloader (yt-dlp) for one URL into one directory.
//!
//! The call is synchronous: output is captured in full once the process exits.
//! There is no timeout, so a hung downloader blocks the calling thread.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Parallel fragment downloads passed as `-N`.
pub const FRAGMENTS: u32 = 10;

/// yt-dlp output template appended to the target directory. Interpreted by the tool.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

#[derive(Debug, Error)]
pub enum InvokeError {
    /// The downloader binary could not be found.
    #[error("{tool} is not available in the container.")]
    ToolUnavailable { tool: String },
    /// The downloader ran and exited non-zero. `log` is stderr, or stdout when stderr is empty.
    #[error("Download failed.")]
    DownloadFailed { log: String },
    /// A URL starting with `-` would be parsed as an option by the downloader.
    #[error("URL must not start with '-'.")]
    OptionLikeUrl,
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
}

impl InvokeError {
    /// Diagnostic text captured from the downloader, if any.
    pub fn log(&self) -> Option<&str> {
        match self {
            InvokeError::DownloadFailed { log } => Some(log),
            _ => None,
        }
    }
}

/// Result of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub target_dir: PathBuf,
    /// Captured stdout.
    pub log: String,
}

/// Handle to the downloader program.
#[derive(Debug, Clone)]
pub struct Invoker {
    program: String,
}

impl Invoker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the downloader: `-N 10 -o <dir>/%(title)s.%(ext)s <url>`.
    pub fn command_args(&self, url: &str, target_dir: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-N"),
            OsString::from(FRAGMENTS.to_string()),
            OsString::from("-o"),
            output_template(target_dir).into_os_string(),
            OsString::from(url),
        ]
    }

    /// Create `target_dir` if needed and download `url` into it.
    pub fn run(&self, url: &str, target_dir: &Path) -> Result<DownloadOutcome, InvokeError> {
        if url.starts_with('-') {
            return Err(InvokeError::OptionLikeUrl);
        }

        std::fs::create_dir_all(target_dir).map_err(|source| InvokeError::CreateDir {
            path: target_dir.to_path_buf(),
            source,
        })?;

        tracing::info!(url, target = %target_dir.display(), tool = %self.program, "starting download");
        let output = Command::new(&self.program)
            .args(self.command_args(url, target_dir))
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => InvokeError::ToolUnavailable {
                    tool: self.program.clone(),
                },
                _ => InvokeError::Spawn {
                    tool: self.program.clone(),
                    source,
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::warn!(url, status = %output.status, "download failed");
            let log = if stderr.is_empty() { stdout } else { stderr };
            return Err(InvokeError::DownloadFailed { log });
        }

        tracing::info!(url, target = %target_dir.display(), "download complete");
        Ok(DownloadOutcome {
            target_dir: target_dir.to_path_buf(),
            log: stdout,
        })
    }
}

/// Full `-o` value for a target directory.
pub fn output_template(target_dir: &Path) -> PathBuf {
    target_dir.join(OUTPUT_TEMPLATE)
}
