//! Single-attempt upstream fetch behind the host guard.

use std::time::Duration;

use reqwest::{header, Client};
use url::Url;

use super::guard::{HostGuard, HostRejection};

/// Default budget for one upstream round-trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Upstream reply, passed back to the client as-is.
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("host not allowed: {0}")]
    Blocked(#[from] HostRejection),
    #[error("upstream timed out after {0}s")]
    Timeout(u64),
    #[error("upstream error: {0}")]
    Upstream(String),
}

#[derive(Clone)]
pub struct OutboundProxy {
    client: Client,
    guard: HostGuard,
    timeout: Duration,
}

impl OutboundProxy {
    pub fn new(client: Client, guard: HostGuard, timeout: Duration) -> Self {
        Self {
            client,
            guard,
            timeout,
        }
    }

    pub fn guard(&self) -> &HostGuard {
        &self.guard
    }

    /// Validate `raw_url` and GET it once. No retry, no caching.
    pub async fn fetch(&self, raw_url: &str) -> Result<ProxiedResponse, ProxyError> {
        let url = Url::parse(raw_url.trim()).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;

        if let Err(rejection) = self.guard.check_url(&url).await {
            log::warn!("[GUARD] Blocked {}: {}", url, rejection);
            return Err(rejection.into());
        }

        match tokio::time::timeout(self.timeout, self.send(url.clone())).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::Timeout(self.timeout.as_secs())),
        }
    }

    async fn send(&self, url: Url) -> Result<ProxiedResponse, ProxyError> {
        let response = self.client.get(url).send().await.map_err(|e| self.upstream_error(e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.bytes().await.map_err(|e| self.upstream_error(e))?.to_vec();

        Ok(ProxiedResponse {
            status,
            content_type,
            body,
        })
    }

    fn upstream_error(&self, e: reqwest::Error) -> ProxyError {
        if e.is_timeout() {
            ProxyError::Timeout(self.timeout.as_secs())
        } else {
            ProxyError::Upstream(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::guard::StaticResolver;
    use std::sync::Arc;

    fn proxy(answers: &[(&str, &[&str])], timeout_secs: u64) -> OutboundProxy {
        let timeout = Duration::from_secs(timeout_secs);
        let guard = HostGuard::new(Arc::new(StaticResolver::new(answers)));
        OutboundProxy::new(crate::http::build_proxy_client(timeout).unwrap(), guard, timeout)
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let p = proxy(&[], 1);
        assert!(matches!(p.fetch("not a url").await, Err(ProxyError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_blocked_hosts_never_fetched() {
        let p = proxy(&[("internal.test", &["192.168.0.10"])], 1);

        let err = p.fetch("http://internal.test/notes").await.unwrap_err();
        assert!(matches!(err, ProxyError::Blocked(HostRejection::NonGlobal(_))));

        let err = p.fetch("ftp://internal.test/notes").await.unwrap_err();
        assert!(matches!(err, ProxyError::Blocked(HostRejection::UnsupportedScheme(_))));

        let err = p.fetch("http://localhost:8000/notes").await.unwrap_err();
        assert!(matches!(err, ProxyError::Blocked(HostRejection::Localhost)));
    }

    #[tokio::test]
    async fn test_send_passes_redirect_through() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 302 Found\r\n\
                      Location: http://10.0.0.1/\r\n\
                      Content-Type: text/markdown\r\n\
                      Content-Length: 2\r\n\
                      Connection: close\r\n\
                      \r\n\
                      hi",
                )
                .await
                .unwrap();
        });

        // Loopback is never admitted by the guard, so call `send` directly
        let p = proxy(&[], 2);
        let url = Url::parse(&format!("http://{}/notes", addr)).unwrap();
        let upstream = p.send(url).await.unwrap();

        assert_eq!(upstream.status, 302);
        assert_eq!(upstream.content_type.as_deref(), Some("text/markdown"));
        assert_eq!(upstream.body, b"hi");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_not_blocked() {
        // The guard accepts the host, but the real resolver cannot find it
        let p = proxy(&[("upstream.invalid", &["93.184.216.34"])], 2);

        let err = p.fetch("http://upstream.invalid/notes").await.unwrap_err();
        assert!(matches!(err, ProxyError::Upstream(_) | ProxyError::Timeout(_)));
    }
}
