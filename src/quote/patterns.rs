//! Literal search patterns for quote requests.

use crate::rank::terms::{identifier_tokens, is_stop_word, MAX_QUERY_TERMS};
use std::collections::HashSet;

const DATABASE_VOCABULARY: &[&str] = &["postgres", "postgresql", "psycopg"];

const DATABASE_PATTERNS: &[&str] = &[
    "psycopg",
    "asyncpg",
    "create_engine",
    "postgresql://",
    "postgres://",
    "DATABASE_URL",
    "sql.Open(\"postgres\"",
    "PgPool",
];

const ENTRY_POINT_VOCABULARY: &[&str] = &[
    "entry point",
    "entrypoint",
    "cli entry",
    "typer",
    "click",
    "console_scripts",
    "project.scripts",
    "__main__",
];

const ENTRY_POINT_PATTERNS: &[&str] = &[
    "if __name__ == \"__main__\"",
    "if __name__ == '__main__'",
    "typer.Typer(",
    "@app.command",
    "@click.command",
    "@click.group",
    "console_scripts",
    "[project.scripts]",
    "argparse.ArgumentParser(",
    "fn main()",
    "func main()",
];

/// Words of the request itself, never useful as search patterns.
const QUOTE_VOCABULARY: &[&str] =
    &["quote", "exact", "line", "lines", "relevant", "number", "numbers", "verbatim", "show"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    DatabaseConnection,
    EntryPoint,
    Identifiers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePatterns {
    pub kind: PatternKind,
    pub patterns: Vec<String>,
}

pub fn derive_patterns(question: &str) -> QuotePatterns {
    let lowered = question.to_lowercase();

    if DATABASE_VOCABULARY.iter().any(|w| lowered.contains(w)) {
        return QuotePatterns {
            kind: PatternKind::DatabaseConnection,
            patterns: to_owned(DATABASE_PATTERNS),
        };
    }
    if ENTRY_POINT_VOCABULARY.iter().any(|w| lowered.contains(w)) {
        return QuotePatterns {
            kind: PatternKind::EntryPoint,
            patterns: to_owned(ENTRY_POINT_PATTERNS),
        };
    }

    let mut seen = HashSet::new();
    let patterns = identifier_tokens(question)
        .filter(|t| !is_stop_word(t))
        .filter(|t| !QUOTE_VOCABULARY.contains(&t.to_ascii_lowercase().as_str()))
        .filter(|t| seen.insert(t.to_string()))
        .take(MAX_QUERY_TERMS)
        .map(str::to_string)
        .collect();
    QuotePatterns { kind: PatternKind::Identifiers, patterns }
}

fn to_owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_uses_database_patterns() {
        let derived = derive_patterns("Quote the exact line where we connect to Postgres.");
        assert_eq!(derived.kind, PatternKind::DatabaseConnection);
        assert!(derived.patterns.contains(&"psycopg".to_string()));
    }

    #[test]
    fn test_entry_point_vocabulary() {
        let derived = derive_patterns("show me the lines for the CLI entry point");
        assert_eq!(derived.kind, PatternKind::EntryPoint);
        assert!(derived.patterns.iter().any(|p| p.contains("__main__")));
    }

    #[test]
    fn test_identifier_fallback_keeps_case_and_skips_request_words() {
        let derived = derive_patterns("Quote the exact lines where load_config reads ConfigFile");
        assert_eq!(derived.kind, PatternKind::Identifiers);
        assert_eq!(derived.patterns, vec!["load_config", "reads", "ConfigFile"]);
    }

    #[test]
    fn test_identifier_fallback_caps_patterns() {
        let derived = derive_patterns("quote alpha beta gamma delta epsilon zeta theta iota");
        assert_eq!(derived.patterns.len(), MAX_QUERY_TERMS);
    }
}
