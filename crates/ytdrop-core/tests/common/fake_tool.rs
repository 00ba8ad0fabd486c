//! Fake downloader scripts for integration tests.
//!
//! Each script records its arguments (one per line) to `args.txt` next to
//! itself, then prints the requested output and exits with the requested code.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Serializes script creation and execution within one test binary. Writing an
/// executable while another thread forks can fail the exec with ETXTBSY.
pub fn lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Clone, Default)]
pub struct FakeTool {
    pub stdout: &'static str,
    pub stderr: &'static str,
    pub exit_code: i32,
}

impl FakeTool {
    /// Write the script into `dir` and return its path.
    pub fn install(&self, dir: &Path) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join("fake-yt-dlp");
        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\n\
             printf '%s' '{}'\n\
             printf '%s' '{}' >&2\n\
             exit {}\n",
            self.stdout, self.stderr, self.exit_code
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

/// Arguments recorded by the last run of a script installed in `dir`.
pub fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
