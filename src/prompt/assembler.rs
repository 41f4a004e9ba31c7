//! Prompt assembly.
//!
//! Section order is fixed: file tree, selected files, piped input, question.
//! The model has to read the grounding context before the question.

use crate::domain::FileEntry;
use crate::repo::LoadedFile;
use std::fmt::Write;

/// Numbered lines shown per file; the rest is summarized in one note.
pub const MAX_NUMBERED_LINES: usize = 400;

/// Content with a right-aligned line number gutter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedText {
    pub text: String,
    pub shown: usize,
    pub total: usize,
}

pub fn number_lines(content: &str, max_lines: usize) -> NumberedText {
    let total = content.lines().count();
    let mut text = String::new();
    for (idx, line) in content.lines().take(max_lines).enumerate() {
        let _ = writeln!(text, "{:>4} | {}", idx + 1, line);
    }
    let shown = total.min(max_lines);
    if total > shown {
        let _ = writeln!(text, "... ({} more lines truncated)", total - shown);
    }
    NumberedText { text, shown, total }
}

/// The user-turn text: tree, files, optional stdin, then the question.
pub fn assemble_context(
    tree: &[FileEntry],
    files: &[LoadedFile],
    question: &str,
    stdin: Option<&str>,
) -> String {
    let mut out = String::new();

    out.push_str("REPO FILE TREE (partial):\n");
    if tree.is_empty() {
        out.push_str("(no files listed)\n");
    }
    for path in tree {
        let _ = writeln!(out, "- {path}");
    }

    out.push_str("\nRELEVANT FILES:\n");
    if files.is_empty() {
        out.push_str("(none selected)\n");
    }
    for file in files {
        if file.content.is_empty() {
            let _ = writeln!(out, "\n--- FILE: {} (unavailable) ---", file.path);
            continue;
        }
        let numbered = number_lines(&file.content, MAX_NUMBERED_LINES);
        let _ = writeln!(
            out,
            "\n--- FILE: {} (lines 1-{} of {}) ---",
            file.path, numbered.shown, numbered.total
        );
        out.push_str(&numbered.text);
    }

    if let Some(stdin) = stdin.filter(|s| !s.trim().is_empty()) {
        out.push_str("\nSTDIN:\n");
        out.push_str(stdin);
        if !stdin.ends_with('\n') {
            out.push('\n');
        }
    }

    out.push_str("\nUSER QUESTION:\n");
    out.push_str(question);
    out
}
