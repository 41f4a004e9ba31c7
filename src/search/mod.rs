//! Literal multi-pattern content search.
//!
//! The search utility is an external collaborator. Everything above this
//! module depends on the [`LiteralSearch`] trait only, so a missing binary or
//! a test stub behaves the same way to callers: a typed [`SearchError`] that
//! they absorb into their fallback path.

use crate::domain::ExcludeSet;
use std::path::Path;
use thiserror::Error;

pub mod ripgrep;

pub use ripgrep::Ripgrep;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search utility '{program}' is not available")]
    Unavailable { program: String },
    #[error("search failed: {message}")]
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Sensitive,
    Insensitive,
}

/// One search invocation over a repository root.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub root: &'a Path,
    pub patterns: &'a [String],
    pub excludes: &'a ExcludeSet,
    pub case: CaseMode,
}

/// One matching line, with a root-relative path and 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: String,
    pub line_number: usize,
    pub content: String,
}

impl SearchHit {
    /// `path:line:content`, the citation format shown to users.
    pub fn citation(&self) -> String {
        format!("{}:{}:{}", self.path, self.line_number, self.content)
    }

    /// Parse one line of `path:line:content` output.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, ':');
        let path = parts.next()?;
        let line_number = parts.next()?.parse().ok()?;
        let content = parts.next().unwrap_or("");
        Some(Self {
            path: crate::utils::normalize_path(path),
            line_number,
            content: content.to_string(),
        })
    }
}

pub trait LiteralSearch {
    fn name(&self) -> &str;

    /// Cheap capability probe.
    fn is_available(&self) -> bool;

    /// Files containing any pattern, in the tool's reported order.
    fn matching_files(&self, request: &SearchRequest<'_>) -> Result<Vec<String>, SearchError>;

    /// Matching lines, at most `limit`.
    fn matching_lines(
        &self,
        request: &SearchRequest<'_>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hit_keeps_colons_in_content() {
        let hit = SearchHit::parse("./src/db.py:12:conn = connect(url='x:y')").expect("hit");
        assert_eq!(hit.path, "src/db.py");
        assert_eq!(hit.line_number, 12);
        assert_eq!(hit.content, "conn = connect(url='x:y')");
        assert_eq!(hit.citation(), "src/db.py:12:conn = connect(url='x:y')");
    }

    #[test]
    fn test_parse_rejects_non_numeric_line() {
        assert!(SearchHit::parse("src/db.py:abc:text").is_none());
        assert!(SearchHit::parse("no separators").is_none());
    }
}
