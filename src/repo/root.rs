//! Repository root discovery

use std::path::{Path, PathBuf};

/// Upward steps searched for a `.git` marker before giving up.
const MAX_ROOT_SEARCH_DEPTH: usize = 50;

/// Walk up from `start` looking for a `.git` entry.
///
/// Returns the first ancestor (including `start`) that contains `.git`, or
/// `start` itself when none is found within the search depth.
pub fn find_repo_root(start: &Path) -> PathBuf {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    let mut current = start.as_path();
    for _ in 0..MAX_ROOT_SEARCH_DEPTH {
        if current.join(".git").exists() {
            if current != start {
                tracing::debug!(
                    "Using repository root {} (detected from {})",
                    current.display(),
                    start.display()
                );
            }
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    tracing::debug!("No .git found; using {} as repository root", start.display());
    start
}
