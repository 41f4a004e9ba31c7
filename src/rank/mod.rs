//! Relevance selection: which files go into a bounded prompt.
//!
//! Selection is a chain of [`SearchBackend`] tiers. Each tier is asked in
//! order; the first one that is available and returns at least one path
//! decides the result. The default chain is content search through the
//! literal-search utility, then the filename/path heuristic.

use crate::domain::{ExcludeSet, FileEntry};
use crate::search::LiteralSearch;
use std::path::Path;

pub mod content;
pub mod heuristic;
pub mod terms;

pub use content::ContentSearchBackend;
pub use heuristic::PathHeuristicBackend;
pub use terms::extract_query_terms;

pub trait SearchBackend {
    fn name(&self) -> &'static str;

    /// Whether this tier can run at all on this system.
    fn is_available(&self) -> bool {
        true
    }

    /// Ranked, distinct paths, at most `max_files`. `None` means the tier
    /// could not produce an answer and the next tier should be tried.
    fn select(
        &self,
        query: &str,
        root: &Path,
        max_files: usize,
        excludes: &ExcludeSet,
    ) -> Option<Vec<FileEntry>>;
}

pub struct RelevanceSelector<'a> {
    tiers: Vec<Box<dyn SearchBackend + 'a>>,
}

impl<'a> RelevanceSelector<'a> {
    pub fn new(tiers: Vec<Box<dyn SearchBackend + 'a>>) -> Self {
        Self { tiers }
    }

    /// Content search over `search`, then the path heuristic.
    pub fn with_search(search: &'a dyn LiteralSearch) -> Self {
        Self::new(vec![
            Box::new(ContentSearchBackend::new(search)),
            Box::new(PathHeuristicBackend),
        ])
    }

    pub fn select(
        &self,
        query: &str,
        root: &Path,
        max_files: usize,
        excludes: &ExcludeSet,
    ) -> Vec<FileEntry> {
        let query = query.trim();
        if query.is_empty() || max_files == 0 {
            return Vec::new();
        }

        for tier in &self.tiers {
            if !tier.is_available() {
                tracing::debug!("Relevance tier '{}' unavailable, skipping", tier.name());
                continue;
            }
            match tier.select(query, root, max_files, excludes) {
                Some(paths) if !paths.is_empty() => {
                    tracing::debug!(
                        "Relevance tier '{}' selected {} files",
                        tier.name(),
                        paths.len()
                    );
                    return paths;
                }
                _ => tracing::debug!("Relevance tier '{}' found nothing", tier.name()),
            }
        }
        Vec::new()
    }
}
