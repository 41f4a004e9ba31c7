//! Grounded quoting.
//!
//! Questions that ask for exact source lines are never sent to the model.
//! The answer is either the literal search hits or a fixed refusal, so a
//! quoted line in the output always exists in the repository.

use crate::domain::ExcludeSet;
use crate::search::{CaseMode, LiteralSearch, SearchHit, SearchRequest};
use std::fmt;
use std::path::Path;

pub mod intent;
pub mod patterns;

pub use intent::is_quote_intent;
pub use patterns::{derive_patterns, PatternKind, QuotePatterns};

pub const MAX_QUOTE_LINES: usize = 200;

pub const REFUSAL: &str =
    "I can't quote exact lines because they were not provided in context.";

/// Build output directories skipped in addition to the configured excludes.
const ARTIFACT_DIRS: &[&str] = &["target", ".tox", ".eggs"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteAnswer {
    Refusal { patterns: Vec<String> },
    Matches { hits: Vec<SearchHit>, truncated: bool },
}

impl QuoteAnswer {
    pub fn is_refusal(&self) -> bool {
        matches!(self, QuoteAnswer::Refusal { .. })
    }
}

impl fmt::Display for QuoteAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteAnswer::Refusal { patterns } => {
                writeln!(f, "{REFUSAL}")?;
                if patterns.is_empty() {
                    writeln!(f, "No searchable identifiers were found in the question.")?;
                    return write!(f, "Name the function, file, or symbol you want quoted.");
                }
                let tried =
                    patterns.iter().map(|p| format!("`{p}`")).collect::<Vec<_>>().join(", ");
                writeln!(f, "No literal matches in the repository for: {tried}")?;
                writeln!(f, "Search manually with:")?;
                write!(f, "  {}", manual_search_command(patterns))
            }
            QuoteAnswer::Matches { hits, truncated } => {
                writeln!(f, "Exact matches (path:line:content):")?;
                writeln!(f, "```text")?;
                for hit in hits {
                    writeln!(f, "{}", hit.citation())?;
                }
                writeln!(f, "```")?;
                if *truncated {
                    writeln!(f, "(showing the first {MAX_QUOTE_LINES} matches)")?;
                }
                write!(f, "Ask a follow-up question if you want these lines explained.")
            }
        }
    }
}

/// Suggested `rg` invocation equivalent to the search that was run.
pub fn manual_search_command(patterns: &[String]) -> String {
    let mut parts = vec!["rg -n --hidden -F".to_string()];
    for pattern in patterns {
        parts.push(format!("-e '{}'", pattern.replace('\'', r"'\''")));
    }
    parts.push(".".to_string());
    parts.join(" ")
}

pub struct QuoteResolver<'a> {
    search: &'a dyn LiteralSearch,
}

impl<'a> QuoteResolver<'a> {
    pub fn new(search: &'a dyn LiteralSearch) -> Self {
        Self { search }
    }

    pub fn resolve(&self, question: &str, root: &Path, excludes: &ExcludeSet) -> QuoteAnswer {
        let derived = derive_patterns(question);
        tracing::debug!("Quote patterns ({:?}): {:?}", derived.kind, derived.patterns);
        if derived.patterns.is_empty() {
            return QuoteAnswer::Refusal { patterns: Vec::new() };
        }

        let excludes = excludes.extended(ARTIFACT_DIRS.iter().copied());
        let request = SearchRequest {
            root,
            patterns: &derived.patterns,
            excludes: &excludes,
            case: CaseMode::Sensitive,
        };

        // One extra line tells us whether the cap cut anything off.
        let mut hits = match self.search.matching_lines(&request, MAX_QUOTE_LINES + 1) {
            Ok(hits) => hits,
            Err(err) => {
                tracing::debug!("Quote search via {} failed: {}", self.search.name(), err);
                Vec::new()
            }
        };

        if hits.is_empty() {
            return QuoteAnswer::Refusal { patterns: derived.patterns };
        }
        let truncated = hits.len() > MAX_QUOTE_LINES;
        hits.truncate(MAX_QUOTE_LINES);
        QuoteAnswer::Matches { hits, truncated }
    }
}
