//! Bounded text loading.

use super::encoding::read_file_safe;
use std::path::Path;

pub const SNIP_MARKER: &str = "...<snip>...";

/// Keep the first and last `max_chars / 2` characters of oversized text.
///
/// Text within the cap is returned unchanged. Counting is by `char`, so the
/// cut never splits a UTF-8 sequence.
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }

    let half = max_chars / 2;
    let head_end = text.char_indices().nth(half).map(|(idx, _)| idx).unwrap_or(text.len());
    let tail_start =
        text.char_indices().nth(total - half).map(|(idx, _)| idx).unwrap_or(text.len());

    format!("{}\n\n{}\n\n{}", &text[..head_end], SNIP_MARKER, &text[tail_start..])
}

/// Read a file for prompt context.
///
/// Any I/O failure yields an empty string: callers treat it as "unavailable",
/// not as proof that the file is empty.
pub fn read_text_limited(path: &Path, max_chars: usize) -> String {
    match read_file_safe(path) {
        Ok((content, _)) => truncate_middle(&content, max_chars),
        Err(err) => {
            tracing::debug!("Skipping unreadable file {}: {:#}", path.display(), err);
            String::new()
        }
    }
}
