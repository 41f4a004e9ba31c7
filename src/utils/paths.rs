//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and drop a leading "./"
    let normalized = path.replace('\\', "/");
    normalized.strip_prefix("./").map(str::to_string).unwrap_or(normalized)
}

/// Repository-relative form of `path`, or `None` when it lies outside `root`.
pub fn relative_to(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = normalize_path(rel.to_str()?);
    if rel.is_empty() {
        None
    } else {
        Some(rel)
    }
}
