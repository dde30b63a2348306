//! Dev notes API — serves a directory of markdown notes, a profile metadata
//! document, and a host-guarded outbound content proxy.

pub mod config;
pub mod controllers;
pub mod http;
pub mod models;
pub mod notes;
pub mod outbound;

use config::Config;
use models::ProfileConfig;
use notes::NoteRepository;
use outbound::OutboundProxy;

pub struct AppState {
    pub config: Config,
    /// Read-only view of the notes directory; every request reads from disk
    pub notes: NoteRepository,
    /// Guarded outbound fetcher behind `/proxy`
    pub proxy: OutboundProxy,
    pub profile: ProfileConfig,
}
