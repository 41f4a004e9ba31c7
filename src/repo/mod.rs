//! Repository context for one command invocation

use crate::domain::{Config, ExcludeSet, FileEntry};
use crate::rank::RelevanceSelector;
use crate::scan::RepoWalker;
use crate::search::LiteralSearch;
use crate::utils::read_text_limited;
use std::path::{Component, Path, PathBuf};

pub mod root;

pub use root::find_repo_root;

/// A selected file and its (possibly truncated) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: FileEntry,
    pub content: String,
}

/// How much of the repository one model turn may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextBudget {
    pub tree_files: usize,
    pub context_files: usize,
    pub file_chars: usize,
}

impl ContextBudget {
    pub fn one_shot(config: &Config) -> Self {
        Self {
            tree_files: config.max_tree_files,
            context_files: config.max_context_files,
            file_chars: config.max_file_chars,
        }
    }

    /// Chat turns resend the whole history, so each one carries less.
    pub fn interactive(config: &Config) -> Self {
        Self {
            tree_files: config.max_tree_files.min(150),
            context_files: config.max_context_files.min(12),
            file_chars: config.max_file_chars.min(40_000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepoContext {
    pub root_path: PathBuf,
}

impl RepoContext {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    pub fn discover(start: &Path) -> Self {
        Self::new(find_repo_root(start))
    }

    pub fn file_tree(&self, max_files: usize, excludes: &ExcludeSet) -> Vec<FileEntry> {
        RepoWalker::new(&self.root_path, excludes.clone()).listing(max_files)
    }

    pub fn select_relevant_files(
        &self,
        query: &str,
        search: &dyn LiteralSearch,
        max_files: usize,
        excludes: &ExcludeSet,
    ) -> Vec<FileEntry> {
        RelevanceSelector::with_search(search).select(query, &self.root_path, max_files, excludes)
    }

    /// File tree plus the loaded relevant files for one question.
    pub fn gather(
        &self,
        question: &str,
        search: &dyn LiteralSearch,
        budget: ContextBudget,
        excludes: &ExcludeSet,
    ) -> (Vec<FileEntry>, Vec<LoadedFile>) {
        let tree = self.file_tree(budget.tree_files, excludes);
        let files = self
            .select_relevant_files(question, search, budget.context_files, excludes)
            .iter()
            .map(|rel| self.read_file(rel, budget.file_chars))
            .collect();
        (tree, files)
    }

    /// Load a repository file for the prompt. Missing or escaping paths load
    /// as empty text.
    pub fn read_file(&self, rel_path: &str, max_chars: usize) -> LoadedFile {
        let content = match self.resolve(rel_path) {
            Some(path) if path.is_file() => read_text_limited(&path, max_chars),
            _ => String::new(),
        };
        LoadedFile { path: rel_path.to_string(), content }
    }

    /// Absolute path for a repository-relative path, refusing anything that
    /// would land outside the root.
    pub fn resolve(&self, rel_path: &str) -> Option<PathBuf> {
        let rel = Path::new(rel_path.trim());
        if rel.as_os_str().is_empty() {
            return None;
        }
        if rel.components().any(|c| !matches!(c, Component::Normal(_) | Component::CurDir)) {
            return None;
        }
        let joined = self.root_path.join(rel);
        match (joined.canonicalize(), self.root_path.canonicalize()) {
            (Ok(resolved), Ok(root)) if !resolved.starts_with(&root) => None,
            _ => Some(joined),
        }
    }
}
