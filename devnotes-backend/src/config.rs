use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDR: &str = "BIND_ADDR";
    pub const NOTES_DIR: &str = "NOTES_DIR";
    pub const WEB_DIR: &str = "WEB_DIR";
    /// Externally reachable base URL (e.g. "https://notes.example.com").
    /// When unset, links in `/metadata` are built from the request's host.
    pub const PUBLIC_URL: &str = "PUBLIC_URL";
    pub const PROXY_TIMEOUT_SECS: &str = "PROXY_TIMEOUT_SECS";
    /// Set to a truthy value ("1", "true", "yes") to list draft notes in `/notes`.
    pub const INCLUDE_DRAFTS: &str = "INCLUDE_DRAFTS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8000;
    pub const BIND_ADDR: &str = "0.0.0.0";
    pub const NOTES_DIR: &str = "data/notes";
    pub const WEB_DIR: &str = "web";
    pub const PROFILE_FILE: &str = "config/profile.ron";
    pub const PROXY_TIMEOUT_SECS: u64 = crate::outbound::fetch::DEFAULT_TIMEOUT_SECS;
}

/// Returns the absolute path to the devnotes-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so relative defaults resolve
/// the same way regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Raw values read as "on", compared case-insensitively.
const TRUTHY: &[&str] = &["1", "true", "yes"];

/// Shared truthiness rule for env flags and boolean frontmatter keys
pub fn is_truthy(raw: &str) -> bool {
    TRUTHY.contains(&raw.trim().to_lowercase().as_str())
}

/// Get the profile RON path
pub fn profile_path() -> PathBuf {
    backend_dir().join(defaults::PROFILE_FILE)
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_addr: String,
    pub notes_dir: PathBuf,
    pub web_dir: PathBuf,
    pub public_url: Option<String>,
    pub proxy_timeout: Duration,
    pub include_drafts: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| backend_dir().join(default))
        };

        Self {
            port: parse_or(&lookup, env_vars::PORT, defaults::PORT),
            bind_addr: lookup(env_vars::BIND_ADDR)
                .unwrap_or_else(|| defaults::BIND_ADDR.to_string()),
            notes_dir: dir(env_vars::NOTES_DIR, defaults::NOTES_DIR),
            web_dir: dir(env_vars::WEB_DIR, defaults::WEB_DIR),
            public_url: lookup(env_vars::PUBLIC_URL)
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            proxy_timeout: Duration::from_secs(parse_or(
                &lookup,
                env_vars::PROXY_TIMEOUT_SECS,
                defaults::PROXY_TIMEOUT_SECS,
            )),
            include_drafts: lookup(env_vars::INCLUDE_DRAFTS)
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}
