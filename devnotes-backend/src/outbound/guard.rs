//! Outbound host guard for the content proxy.
//!
//! A host is admissible only when its URL scheme is http(s) and every
//! address it resolves to is globally routable. Any lookup failure, empty
//! answer, unparseable address, or single non-global address rejects the
//! whole host.
//!
//! The check resolves the host independently of the later fetch, so a
//! resolver that answers differently between the two (DNS rebinding) is not
//! caught here.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

/// Schemes the proxy may fetch.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Why a host was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostRejection {
    #[error("scheme '{0}' is not allowed")]
    UnsupportedScheme(String),
    #[error("url has no host")]
    MissingHost,
    #[error("localhost is not allowed")]
    Localhost,
    #[error("could not resolve host: {0}")]
    Unresolvable(String),
    #[error("host resolved to no addresses")]
    NoAddresses,
    #[error("resolver returned an unparseable address: {0}")]
    UnparseableAddress(String),
    #[error("host resolves to non-global address {0}")]
    NonGlobal(IpAddr),
}

/// Resolves a hostname to the textual addresses the resolver reports.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str) -> io::Result<Vec<String>>;
}

/// Resolver backed by the operating system (`getaddrinfo` via tokio).
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> io::Result<Vec<String>> {
        let addrs = tokio::net::lookup_host((host, 0)).await?;
        Ok(addrs.map(|addr| addr.ip().to_string()).collect())
    }
}

#[derive(Clone)]
pub struct HostGuard {
    resolver: Arc<dyn HostResolver>,
}

impl HostGuard {
    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self { resolver }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemResolver))
    }

    pub async fn is_outbound_host_allowed(&self, scheme: &str, hostname: &str) -> bool {
        self.check(scheme, hostname).await.is_ok()
    }

    pub async fn check_url(&self, url: &Url) -> Result<(), HostRejection> {
        self.check(url.scheme(), url.host_str().unwrap_or("")).await
    }

    /// Validate `scheme` and `hostname`. The scheme is checked before any lookup.
    pub async fn check(&self, scheme: &str, hostname: &str) -> Result<(), HostRejection> {
        if !ALLOWED_SCHEMES.contains(&scheme) {
            return Err(HostRejection::UnsupportedScheme(scheme.to_string()));
        }
        if hostname.is_empty() {
            return Err(HostRejection::MissingHost);
        }
        // Exact, case-sensitive match. Other spellings rely on the address check.
        if hostname == "localhost" {
            return Err(HostRejection::Localhost);
        }

        // IPv6 literals arrive bracketed from URLs
        let host = hostname
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(hostname);

        let raw_addrs = self
            .resolver
            .resolve(host)
            .await
            .map_err(|e| HostRejection::Unresolvable(e.to_string()))?;
        if raw_addrs.is_empty() {
            return Err(HostRejection::NoAddresses);
        }

        for raw in &raw_addrs {
            let ip: IpAddr = raw
                .parse()
                .map_err(|_| HostRejection::UnparseableAddress(raw.clone()))?;
            if !is_global_ip(&ip) {
                return Err(HostRejection::NonGlobal(ip));
            }
        }

        Ok(())
    }
}

/// Whether `ip` is publicly routable (not loopback, private, link-local,
/// unspecified, documentation, multicast or otherwise reserved).
pub fn is_global_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_global_v4(v4),
        IpAddr::V6(v6) => is_global_v6(v6),
    }
}

fn is_global_v4(ip: &Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();

    let this_network = a == 0;
    let shared = a == 100 && (b & 0xc0) == 64;
    let ietf_protocol = a == 192 && b == 0 && c == 0;
    let benchmarking = a == 198 && (b & 0xfe) == 18;
    let reserved = a >= 240;

    !(this_network
        || ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_documentation()
        || ip.is_multicast()
        || shared
        || ietf_protocol
        || benchmarking
        || reserved)
}

fn is_global_v6(ip: &Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_global_v4(&v4);
    }

    let s = ip.segments();

    // 64:ff9b::/96 well-known NAT64 prefix embeds an IPv4 address
    if s[..6] == [0x64, 0xff9b, 0, 0, 0, 0] {
        let [a, b] = s[6].to_be_bytes();
        let [c, d] = s[7].to_be_bytes();
        return is_global_v4(&Ipv4Addr::new(a, b, c, d));
    }

    // 2002::/16 6to4 embeds an IPv4 address
    if s[0] == 0x2002 {
        let [a, b] = s[1].to_be_bytes();
        let [c, d] = s[2].to_be_bytes();
        return is_global_v4(&Ipv4Addr::new(a, b, c, d));
    }

    // Only 2000::/3 is global unicast
    let global_unicast = (s[0] & 0xe000) == 0x2000;
    let ietf_protocol = s[0] == 0x2001 && s[1] < 0x200;
    let documentation = s[0] == 0x2001 && s[1] == 0xdb8;

    global_unicast && !ietf_protocol && !documentation
}

/// Resolver answering from a fixed table, recording every lookup.
#[cfg(test)]
pub struct StaticResolver {
    answers: std::collections::HashMap<String, Vec<String>>,
    lookups: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl StaticResolver {
    pub fn new(answers: &[(&str, &[&str])]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(host, addrs)| {
                    (host.to_string(), addrs.iter().map(|a| a.to_string()).collect())
                })
                .collect(),
            lookups: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, host: &str) -> io::Result<Vec<String>> {
        self.lookups.lock().unwrap().push(host.to_string());
        self.answers
            .get(host)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such host: {}", host)))
    }
}
