//! NoteRepository — read-only access to a directory of markdown notes
//!
//! Every call goes back to disk; there is no in-memory cache. Invalid notes
//! (no frontmatter, missing title/date, bad date) are indistinguishable from
//! missing ones at the public boundary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file_ops;
use super::frontmatter::split_frontmatter;
use super::record::{build_frontmatter, NoteRejection};
use crate::models::Note;

/// Internal result of looking up a single slug.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteLookup {
    Valid(Note),
    Invalid(NoteRejection),
    Missing,
}

impl NoteLookup {
    pub fn into_note(self) -> Option<Note> {
        match self {
            NoteLookup::Valid(note) => Some(note),
            NoteLookup::Invalid(_) | NoteLookup::Missing => None,
        }
    }
}

/// Repository over a single notes directory
#[derive(Debug, Clone)]
pub struct NoteRepository {
    notes_dir: PathBuf,
}

impl NoteRepository {
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
        }
    }

    /// Get the notes directory path
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Slugs of all note files, sorted ascending. Creates the directory on first use.
    pub fn list_slugs(&self) -> io::Result<Vec<String>> {
        file_ops::ensure_notes_dir(&self.notes_dir)?;
        file_ops::list_slugs(&self.notes_dir)
    }

    /// Look up `slug`, keeping the reason when the note is rejected.
    pub fn inspect(&self, slug: &str) -> NoteLookup {
        if !file_ops::is_valid_slug(slug) {
            return NoteLookup::Missing;
        }

        let path = file_ops::note_path(&self.notes_dir, slug);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return NoteLookup::Missing,
            Err(e) => return NoteLookup::Invalid(NoteRejection::Unreadable(e.to_string())),
        };

        let Some(parsed) = split_frontmatter(&text) else {
            return NoteLookup::Invalid(NoteRejection::NoFrontmatter);
        };

        match build_frontmatter(&parsed.header) {
            Ok(frontmatter) => NoteLookup::Valid(Note {
                slug: slug.to_string(),
                frontmatter,
                content: parsed.body,
            }),
            Err(reason) => NoteLookup::Invalid(reason),
        }
    }

    /// Load a single note. Missing and invalid notes both yield `None`.
    pub fn load(&self, slug: &str) -> Option<Note> {
        match self.inspect(slug) {
            NoteLookup::Invalid(reason) => {
                log::debug!("[NOTES] Skipping '{}': {}", slug, reason);
                None
            }
            lookup => lookup.into_note(),
        }
    }

    /// Load every valid note, newest first. Drafts are dropped unless `include_drafts`.
    ///
    /// Notes sharing a date keep their slug order.
    pub fn load_all(&self, include_drafts: bool) -> io::Result<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .list_slugs()?
            .iter()
            .filter_map(|slug| self.load(slug))
            .filter(|note| include_drafts || !note.frontmatter.draft)
            .collect();

        notes.sort_by(|a, b| b.frontmatter.date.cmp(&a.frontmatter.date));
        Ok(notes)
    }

    /// Raw file text of a valid note, frontmatter included.
    pub fn read_raw(&self, slug: &str) -> Option<String> {
        self.load(slug)?;
        fs::read_to_string(file_ops::note_path(&self.notes_dir, slug)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::{tempdir, TempDir};

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn note_text(title: &str, date: &str, extra: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\n{}---\nbody of {}\n", title, date, extra, title)
    }

    #[test]
    fn test_load_race_scenario() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            "2024-01-05-race.md",
            "---\ntitle: First Race\ndate: 2024-01-05\ntags: [racing, debut]\ndraft: false\n---\nBody text here.\n",
        );
        let repo = NoteRepository::new(dir.path());

        let note = repo.load("2024-01-05-race").unwrap();
        assert_eq!(note.slug, "2024-01-05-race");
        assert_eq!(note.frontmatter.title, "First Race");
        assert_eq!(note.frontmatter.date, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
        assert_eq!(note.frontmatter.tags, vec!["racing", "debut"]);
        assert!(!note.frontmatter.draft);
        assert_eq!(note.content, "Body text here.\n");
    }

    #[test]
    fn test_missing_and_invalid_collapse_to_none() {
        let dir = tempdir().unwrap();
        write(&dir, "plain.md", "# No frontmatter\n\nJust text.\n");
        write(&dir, "bad-date.md", "---\ntitle: Bad\ndate: not-a-date\n---\nbody\n");
        write(&dir, "no-title.md", "---\ndate: 2024-01-01\n---\nbody\n");
        write(&dir, "no-date.md", "---\ntitle: Undated\n---\nbody\n");
        let repo = NoteRepository::new(dir.path());

        for slug in ["plain", "bad-date", "no-title", "no-date", "nope"] {
            assert!(repo.load(slug).is_none(), "{slug} should be absent");
        }
    }

    #[test]
    fn test_inspect_keeps_rejection_reason() {
        let dir = tempdir().unwrap();
        write(&dir, "plain.md", "no header");
        write(&dir, "bad-date.md", "---\ntitle: Bad\ndate: not-a-date\n---\n");
        let repo = NoteRepository::new(dir.path());

        assert_eq!(repo.inspect("plain"), NoteLookup::Invalid(NoteRejection::NoFrontmatter));
        assert_eq!(
            repo.inspect("bad-date"),
            NoteLookup::Invalid(NoteRejection::UnparseableDate("not-a-date".to_string()))
        );
        assert_eq!(repo.inspect("ghost"), NoteLookup::Missing);
    }

    #[test]
    fn test_traversal_slugs_are_missing() {
        let outer = tempdir().unwrap();
        let notes_dir = outer.path().join("notes");
        fs::create_dir(&notes_dir).unwrap();
        fs::write(outer.path().join("secret.md"), note_text("Secret", "2024-01-01", "")).unwrap();
        let repo = NoteRepository::new(&notes_dir);

        assert_eq!(repo.inspect("../secret"), NoteLookup::Missing);
        assert!(repo.read_raw("../secret").is_none());
    }

    #[test]
    fn test_load_all_sorts_newest_first_and_hides_drafts() {
        let dir = tempdir().unwrap();
        write(&dir, "a-old.md", &note_text("Old", "2023-06-01", ""));
        write(&dir, "b-new.md", &note_text("New", "2024-06-01T08:00:00Z", ""));
        write(&dir, "c-mid.md", &note_text("Mid", "2024-01-01", ""));
        write(&dir, "d-draft.md", &note_text("Draft", "2025-01-01", "draft: yes\n"));
        write(&dir, "e-broken.md", "---\ntitle: Broken\n---\n");
        let repo = NoteRepository::new(dir.path());

        let published: Vec<String> = repo.load_all(false).unwrap().into_iter().map(|n| n.slug).collect();
        assert_eq!(published, vec!["b-new", "c-mid", "a-old"]);

        let all: Vec<String> = repo.load_all(true).unwrap().into_iter().map(|n| n.slug).collect();
        assert_eq!(all, vec!["d-draft", "b-new", "c-mid", "a-old"]);
    }

    #[test]
    fn test_load_all_ties_keep_slug_order() {
        let dir = tempdir().unwrap();
        write(&dir, "zeta.md", &note_text("Z", "2024-05-05", ""));
        write(&dir, "alpha.md", &note_text("A", "2024-05-05", ""));
        write(&dir, "mid.md", &note_text("M", "2024-05-05", ""));
        let repo = NoteRepository::new(dir.path());

        let slugs: Vec<String> = repo.load_all(false).unwrap().into_iter().map(|n| n.slug).collect();
        assert_eq!(slugs, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_list_slugs_creates_directory() {
        let dir = tempdir().unwrap();
        let notes_dir = dir.path().join("fresh");
        let repo = NoteRepository::new(&notes_dir);

        assert!(repo.list_slugs().unwrap().is_empty());
        assert!(notes_dir.is_dir());
        assert!(repo.load_all(true).unwrap().is_empty());
    }

    #[test]
    fn test_read_raw_returns_whole_file() {
        let dir = tempdir().unwrap();
        let text = note_text("Raw", "2024-02-02", "summary: kept\n");
        write(&dir, "raw.md", &text);
        write(&dir, "invalid.md", "no header\n");
        let repo = NoteRepository::new(dir.path());

        assert_eq!(repo.read_raw("raw").as_deref(), Some(text.as_str()));
        assert!(repo.read_raw("invalid").is_none());
    }
}
