use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed header of a note, built from its frontmatter block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteFrontMatter {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// A fully loaded note. Built fresh on every read, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub slug: String,
    pub frontmatter: NoteFrontMatter,
    pub content: String,
}

impl Note {
    pub fn to_list_item(&self) -> NoteListItem {
        NoteListItem {
            slug: self.slug.clone(),
            title: self.frontmatter.title.clone(),
            date: self.frontmatter.date,
            tags: self.frontmatter.tags.clone(),
            summary: self.frontmatter.summary.clone(),
        }
    }
}

/// Listing projection of a note (no body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteListItem {
    pub slug: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesListResponse {
    pub count: usize,
    pub items: Vec<NoteListItem>,
}

impl NotesListResponse {
    pub fn from_notes(notes: &[Note]) -> Self {
        let items: Vec<NoteListItem> = notes.iter().map(Note::to_list_item).collect();
        Self {
            count: items.len(),
            items,
        }
    }
}
