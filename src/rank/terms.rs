//! Query tokenization.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Upper bound on terms handed to a search backend.
pub const MAX_QUERY_TERMS: usize = 6;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9_]{2,}").expect("identifier regex is valid")
});

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "but", "not", "you", "your", "with", "this", "that", "from",
        "have", "has", "was", "were", "what", "where", "when", "which", "who", "why", "how",
        "does", "did", "can", "could", "should", "would", "will", "there", "here", "into", "about",
        "then", "than", "them", "they", "these", "those", "its", "our", "out", "any", "all", "some",
        "code", "file", "files", "please", "show", "tell", "explain", "find", "use", "used",
        "using", "want", "need", "make", "get", "let", "see", "also", "just", "like", "work",
        "works",
    ]
    .into_iter()
    .collect()
});

/// Identifier-like runs: alphabetic first char, length >= 3.
pub fn identifier_tokens(text: &str) -> impl Iterator<Item = &str> {
    IDENTIFIER.find_iter(text).map(|m| m.as_str())
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token.to_ascii_lowercase().as_str())
}

/// Lower-cased, de-duplicated, stop-word-free identifier terms.
///
/// When filtering leaves nothing, the whole lower-cased query becomes the
/// single term. Empty input yields no terms.
pub fn extract_query_terms(query: &str) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let terms: Vec<String> = identifier_tokens(query)
        .map(str::to_ascii_lowercase)
        .filter(|t| !STOP_WORDS.contains(t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .take(MAX_QUERY_TERMS)
        .collect();

    if terms.is_empty() {
        vec![query.to_lowercase()]
    } else {
        terms
    }
}

/// Raw tokens for the path heuristic: split on whitespace and `/`, no filtering.
pub fn path_tokens(query: &str) -> Vec<String> {
    query
        .split(|c: char| c.is_whitespace() || c == '/')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
