//! File operations for the notes directory
//!
//! Handles directory creation, slug enumeration and slug → path resolution.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of note files, without the dot.
pub const NOTE_EXTENSION: &str = "md";

/// Create the notes directory if it does not exist yet (idempotent)
pub fn ensure_notes_dir(notes_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(notes_dir)
}

/// A slug is a single path component that cannot escape the notes directory.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains("..")
        && !slug.contains('/')
        && !slug.contains('\\')
        && !slug.contains('\0')
}

/// Path of the file backing `slug`
pub fn note_path(notes_dir: &Path, slug: &str) -> PathBuf {
    notes_dir.join(format!("{}.{}", slug, NOTE_EXTENSION))
}

/// Slugs of every note file directly inside `notes_dir`, sorted ascending.
/// Only a failure to open the directory itself is an error.
pub fn list_slugs(notes_dir: &Path) -> io::Result<Vec<String>> {
    let entries = fs::read_dir(notes_dir)?.map(|entry| entry.map(|e| e.path()));
    Ok(collect_slugs(entries))
}

/// Entries that cannot be read are skipped like any other non-note file
fn collect_slugs(entries: impl IntoIterator<Item = io::Result<PathBuf>>) -> Vec<String> {
    let mut slugs = Vec::new();

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log::debug!("[NOTES] Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if path.extension().map(|e| e != NOTE_EXTENSION).unwrap_or(true) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            slugs.push(stem.to_string());
        }
    }

    slugs.sort();
    slugs
}
