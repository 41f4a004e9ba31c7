//! Backup-before-write and atomic replacement of files.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Copy `path` to a timestamped sibling, `<name>.bak_<YYYYmmdd_HHMMSS>`.
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup = unique_backup_path(path, &stamp)?;
    fs::copy(path, &backup).with_context(|| {
        format!("Failed to back up {} to {}", path.display(), backup.display())
    })?;
    tracing::debug!("Backed up {} to {}", path.display(), backup.display());
    Ok(backup)
}

fn unique_backup_path(path: &Path, stamp: &str) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Cannot back up {}: no file name", path.display()))?;

    let base = path.with_file_name(format!("{name}.bak_{stamp}"));
    if !base.exists() {
        return Ok(base);
    }
    let mut n = 1;
    loop {
        let candidate = path.with_file_name(format!("{name}.bak_{stamp}_{n}"));
        if !candidate.exists() {
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Replace `path` with `content` via a temp file in the same directory and a
/// rename, so readers see either the old file or the new one.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    tmp.as_file().sync_all().context("Failed to flush temp file")?;

    if let Ok(meta) = fs::metadata(path) {
        // Keep the target's mode (e.g. executable scripts).
        let _ = tmp.as_file().set_permissions(meta.permissions());
    }

    tmp.persist(path).map_err(|e| e.error).with_context(|| {
        format!("Failed to replace {}", path.display())
    })?;
    Ok(())
}

/// Back up (optionally) and then atomically write. Returns the backup path.
pub fn safe_apply(path: &Path, content: &str, make_backup: bool) -> Result<Option<PathBuf>> {
    let backup = if make_backup && path.exists() { Some(backup_file(path)?) } else { None };
    atomic_write(path, content)?;
    Ok(backup)
}
