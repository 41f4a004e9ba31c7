//! Core value types shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Path segments that are never part of a listing, search, or context pack.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".venv",
    "venv",
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    "node_modules",
    "dist",
    "build",
    ".next",
    ".idea",
    ".vscode",
];

/// Repository-relative path with forward slashes.
pub type FileEntry = String;

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ollama_host: String,
    pub model: String,
    pub max_file_chars: usize,
    pub max_context_files: usize,
    pub max_tree_files: usize,
    pub extra_excludes: Vec<String>,
    pub timeout_secs: u64,
    pub search_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_host: "http://localhost:11434".to_string(),
            model: "qwen2.5-coder:7b".to_string(),
            max_file_chars: 120_000,
            max_context_files: 35,
            max_tree_files: 250,
            extra_excludes: Vec::new(),
            timeout_secs: 120,
            search_program: "rg".to_string(),
        }
    }
}

impl Config {
    /// Built-in exclusions unioned with `extra_excludes`.
    pub fn exclude_set(&self) -> ExcludeSet {
        ExcludeSet::with_extra(self.extra_excludes.iter().map(String::as_str))
    }
}

/// Set of path segments; a path is excluded when any of its segments is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeSet {
    segments: BTreeSet<String>,
}

impl Default for ExcludeSet {
    fn default() -> Self {
        Self::with_extra(std::iter::empty())
    }
}

impl ExcludeSet {
    pub fn with_extra<'a>(extra: impl IntoIterator<Item = &'a str>) -> Self {
        let segments = DEFAULT_EXCLUDES
            .iter()
            .copied()
            .chain(extra)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    /// Add more segments, e.g. build-artifact directories for quote search.
    pub fn extended<'a>(&self, extra: impl IntoIterator<Item = &'a str>) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(extra.into_iter().map(str::to_string));
        Self { segments }
    }

    pub fn contains_segment(&self, segment: &str) -> bool {
        self.segments.contains(segment)
    }

    /// True when any `/`-separated segment of `rel_path` is excluded.
    pub fn excludes(&self, rel_path: &str) -> bool {
        rel_path.split('/').any(|part| self.segments.contains(part))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

/// Candidate produced by the path heuristic tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub score: u32,
    pub path: FileEntry,
}

impl Ord for RankedCandidate {
    /// Higher score first, then ascending path.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.score.cmp(&self.score).then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for RankedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandScope {
    Project,
    User,
}

impl CommandScope {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandScope::Project => "project",
            CommandScope::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "project" => Some(CommandScope::Project),
            "user" => Some(CommandScope::User),
            _ => None,
        }
    }
}

impl fmt::Display for CommandScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A markdown prompt template discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub scope: CommandScope,
    pub name: String,
    pub path: PathBuf,
}

impl CommandSpec {
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.scope, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}
