//! Outbound content proxy — lets the web UI fetch remote notes without CORS.
//!
//! `guard` decides whether a target host may be contacted at all; `fetch`
//! performs the single, time-boxed upstream request.

pub mod fetch;
pub mod guard;

pub use fetch::{OutboundProxy, ProxiedResponse, ProxyError};
pub use guard::{HostGuard, HostRejection};
