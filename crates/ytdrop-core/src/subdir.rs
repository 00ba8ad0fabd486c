//! Resolution of user-supplied subdirectories against the download root.
//!
//! Input is untrusted form data. A subdirectory is accepted only when it is made
//! of `[A-Za-z0-9._-]` segments separated by single `/`, contains no `.` or `..`
//! segment, and still lands under the root after symlinks are resolved.

use regex::Regex;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One or more safe segments joined by single slashes.
pub const SAFE_SUBDIR_PATTERN: &str = r"^[A-Za-z0-9._-]+(?:/[A-Za-z0-9._-]+)*$";

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Pattern mismatch, empty segment, or a `.`/`..` segment.
    #[error("Subdirectory contains invalid characters.")]
    InvalidCharacters,
    /// The resolved path left the download root (e.g. through a symlink).
    #[error("Subdirectory escapes download root.")]
    EscapesRoot,
    #[error("failed to resolve {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// True for errors caused by the input itself rather than the filesystem.
    pub fn is_validation(&self) -> bool {
        matches!(self, ResolveError::InvalidCharacters | ResolveError::EscapesRoot)
    }
}

/// Validates subdirectory requests and maps them under a fixed root.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct SubdirResolver {
    root: PathBuf,
    pattern: Regex,
}

impl SubdirResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pattern: Regex::new(SAFE_SUBDIR_PATTERN).expect("subdirectory pattern is valid"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `raw` to an absolute directory under the root.
    ///
    /// Every `Ok` value is the root itself or a descendant of it; the directory
    /// is not created here.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, ResolveError> {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return Ok(self.root.clone());
        }
        self.validate(cleaned)?;

        let joined = self.root.join(cleaned);
        let resolved = canonicalize_lenient(&joined).map_err(|source| ResolveError::Io {
            path: joined.clone(),
            source,
        })?;
        let canonical_root =
            canonicalize_lenient(&self.root).map_err(|source| ResolveError::Io {
                path: self.root.clone(),
                source,
            })?;

        // Rebase onto the configured root so the result keeps its literal prefix
        // even when the root itself is reached through a symlink.
        let relative = resolved
            .strip_prefix(&canonical_root)
            .map_err(|_| ResolveError::EscapesRoot)?;
        let target = self.root.join(relative);
        if !target.starts_with(&self.root) {
            return Err(ResolveError::EscapesRoot);
        }
        tracing::debug!(subdir = cleaned, target = %target.display(), "resolved subdirectory");
        Ok(target)
    }

    fn validate(&self, cleaned: &str) -> Result<(), ResolveError> {
        if !self.pattern.is_match(cleaned) {
            return Err(ResolveError::InvalidCharacters);
        }
        // Dots pass the character class, so `.` and `..` need their own check.
        if cleaned.split('/').any(|seg| seg == "." || seg == "..") {
            return Err(ResolveError::InvalidCharacters);
        }
        Ok(())
    }
}

/// Trim surrounding whitespace, then surrounding slashes.
pub fn clean(raw: &str) -> &str {
    raw.trim().trim_matches('/')
}

/// Canonicalize the longest existing ancestor of `path` and append the rest
/// lexically. Callers only pass paths whose missing tail is free of `.`/`..`.
fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        match fs::canonicalize(&existing) {
            Ok(mut canonical) => {
                for name in missing.iter().rev() {
                    canonical.push(name);
                }
                return Ok(canonical);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let Some(name) = existing.file_name().map(|n| n.to_os_string()) else {
                    return Err(e);
                };
                missing.push(name);
                if !existing.pop() {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }
}
