//! Conversation payloads for the model.
//!
//! Ask turns carry a grounding context built by [`assemble_context`]. Edit
//! turns carry one target file and an instruction; the reply is expected to
//! be the whole new file.

use crate::domain::{ChatMessage, FileEntry};
use crate::repo::LoadedFile;

pub mod assembler;
pub mod system;

pub use assembler::{assemble_context, number_lines, MAX_NUMBERED_LINES};
pub use system::{SYSTEM_ASK, SYSTEM_EDIT};

pub fn build_ask_messages(
    tree: &[FileEntry],
    files: &[LoadedFile],
    question: &str,
    stdin: Option<&str>,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_ASK),
        ChatMessage::user(assemble_context(tree, files, question, stdin)),
    ]
}

pub fn build_edit_messages(target: &str, instruction: &str, current: &str) -> Vec<ChatMessage> {
    let user = format!(
        "TARGET FILE PATH:\n{target}\n\nINSTRUCTION:\n{instruction}\n\n\
         CURRENT FILE CONTENT:\n{current}"
    );
    vec![ChatMessage::system(SYSTEM_EDIT), ChatMessage::user(user)]
}

/// Remove one surrounding markdown fence, if the model added it anyway.
pub fn strip_code_fences(reply: &str) -> String {
    let trimmed = reply.trim();
    if !trimmed.starts_with("```") {
        return reply.to_string();
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    lines.remove(0);
    if lines.last().map(|l| l.trim() == "```").unwrap_or(false) {
        lines.pop();
    }
    let mut body = lines.join("\n");
    body.push('\n');
    body
}
