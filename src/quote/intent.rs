//! Quote-intent classification.

/// Phrases that mark a request for verbatim source lines.
pub const QUOTE_TRIGGERS: &[&str] = &[
    "quote",
    "exact line",
    "exact lines",
    "relevant lines",
    "show the lines",
    "show me the lines",
    "line number",
    "line numbers",
    "verbatim",
];

/// Case-insensitive substring match against [`QUOTE_TRIGGERS`].
pub fn is_quote_intent(question: &str) -> bool {
    let lowered = question.to_lowercase();
    QUOTE_TRIGGERS.iter().any(|trigger| lowered.contains(trigger))
}
