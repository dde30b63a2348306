//! Outbound HTTP client construction.

use std::time::Duration;

use reqwest::{redirect, Client};

const USER_AGENT: &str = concat!("devnotes-backend/", env!("CARGO_PKG_VERSION"));

/// Client for the content proxy.
///
/// Redirects are not followed: a redirect target would bypass the host guard.
pub fn build_proxy_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(redirect::Policy::none())
        .build()
}
