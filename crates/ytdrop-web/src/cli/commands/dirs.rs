//! `ytdrop dirs` – print the subdirectories the web form offers.

use anyhow::Result;
use ytdrop_core::config::YtdropConfig;
use ytdrop_core::listing::{self, DirEntry};

pub async fn run_dirs(cfg: &YtdropConfig) -> Result<()> {
    let root = cfg.download_root.clone();
    let entries = tokio::task::spawn_blocking(move || listing::list_subdirs(&root)).await?;
    if entries.is_empty() {
        println!("No subdirectories under {}.", cfg.download_root.display());
    } else {
        for line in format_entries(&entries) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One line per entry, indented two spaces per level below the first.
pub(crate) fn format_entries(entries: &[DirEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| format!("{}{}", "  ".repeat(e.depth.saturating_sub(1)), e.path))
        .collect()
}
