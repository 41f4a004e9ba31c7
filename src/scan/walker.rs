//! Lazy repository walker honoring the exclude set

use crate::domain::{ExcludeSet, FileEntry};
use crate::utils::relative_to;
use ignore::{DirEntry, WalkBuilder};
use std::path::PathBuf;

/// Enumerates repository files as root-relative paths.
///
/// Excluded directories are pruned before descent, so large trees such as
/// `node_modules` are never visited. Symbolic links are not followed.
pub struct RepoWalker {
    root_path: PathBuf,
    excludes: ExcludeSet,
}

impl RepoWalker {
    pub fn new(root_path: impl Into<PathBuf>, excludes: ExcludeSet) -> Self {
        Self { root_path: root_path.into(), excludes }
    }

    /// Lazily yield every non-excluded file under the root.
    ///
    /// Order is traversal order (siblings sorted by name). Unreadable
    /// directories are skipped.
    pub fn files(&self) -> impl Iterator<Item = FileEntry> + '_ {
        let prune = self.excludes.clone();
        let mut builder = WalkBuilder::new(&self.root_path);
        builder
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| !is_excluded_dir(entry, &prune));

        builder.build().filter_map(move |entry_result| {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry: {}", err);
                    return None;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return None;
            }
            let rel_path = relative_to(&self.root_path, entry.path())?;
            if self.excludes.excludes(&rel_path) {
                return None;
            }
            Some(rel_path)
        })
    }

    /// First `max_files` entries of the walk.
    pub fn listing(&self, max_files: usize) -> Vec<FileEntry> {
        self.files().take(max_files).collect()
    }
}

fn is_excluded_dir(entry: &DirEntry, excludes: &ExcludeSet) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    is_dir && entry.file_name().to_str().is_some_and(|name| excludes.contains_segment(name))
}
