//! Dev notes — markdown files with a lightweight `key: value` frontmatter
//!
//! One file per note, named `<slug>.md`, in a single flat directory.
//! Parsing is split into the raw header/body split (`frontmatter`), the
//! typed record builder (`record`), and the directory-backed repository
//! (`store`).

pub mod file_ops;
pub mod frontmatter;
pub mod record;
pub mod store;

pub use store::NoteRepository;
