//! Listing of existing download subdirectories for the browse view.

use std::path::Path;
use walkdir::WalkDir;

/// Deepest level below the root that is listed (direct children are depth 1).
pub const MAX_DEPTH: usize = 6;

/// A subdirectory of the download root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Path relative to the root, `/`-separated.
    pub path: String,
    /// 1 for direct children of the root.
    pub depth: usize,
}

impl DirEntry {
    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// List subdirectories of `root` down to [`MAX_DEPTH`].
pub fn list_subdirs(root: &Path) -> Vec<DirEntry> {
    list_subdirs_to_depth(root, MAX_DEPTH)
}

/// List subdirectories of `root` down to `max_depth`, depth-first with siblings
/// sorted by name. Hidden directories (leading `.`) are neither listed nor
/// entered, symlinks are not followed, and a missing root yields nothing.
pub fn list_subdirs_to_depth(root: &Path, max_depth: usize) -> Vec<DirEntry> {
    if max_depth == 0 || !root.is_dir() {
        return Vec::new();
    }

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| {
            let relative = e.path().strip_prefix(root).ok()?;
            // Non-UTF-8 names cannot be submitted back through the form.
            let Some(relative) = relative.to_str() else {
                tracing::debug!("skipping non-UTF-8 directory: {}", e.path().display());
                return None;
            };
            Some(DirEntry {
                path: relative.replace(std::path::MAIN_SEPARATOR, "/"),
                depth: e.depth(),
            })
        })
        .collect()
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().as_encoded_bytes().starts_with(b".")
}
