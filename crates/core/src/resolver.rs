use std::fs;
use std::path::{Path, PathBuf};

/// Resolves a buffer name to the canonical key used by the mapping.
/// Returns None for unnamed buffers and for targets that are neither an
/// existing regular file nor a directory. Canonicalization collapses
/// symlinks and relative segments so one physical file gets one key.
pub fn resolve(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let path = fs::canonicalize(name).ok()?;
    if is_present(&path) {
        Some(path)
    } else {
        None
    }
}

/// True when the path currently exists as a regular file or directory.
pub fn is_present(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() || m.is_dir())
        .unwrap_or(false)
}
