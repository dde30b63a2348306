pub mod note;
pub mod profile;

pub use note::{Note, NoteFrontMatter, NoteListItem, NotesListResponse};
pub use profile::{ProfileConfig, ProfileMetadata};
