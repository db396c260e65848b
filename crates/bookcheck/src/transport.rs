//! HTTP transport seam
//!
//! Executors talk to the Library API through [`Transport`]. [`HttpTransport`]
//! is the reqwest-backed implementation; tests substitute scripted ones.

use std::time::Duration;

use async_trait::async_trait;
use bookcheck_core::{Error, Result};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

/// Status and body of one HTTP round-trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking-per-call HTTP collaborator. Every method resolves once the full
/// response body has been read; errors are connection-level only, any HTTP
/// status is a successful round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `path`
    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse>;

    /// GET `path` with the given query parameters
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse>;
}

/// reqwest-backed transport rooted at a base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport for `base_url` with an optional request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidConfig(format!("Invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "Base URL '{base_url}' cannot carry a path"
            )));
        }

        let builder = reqwest::Client::builder();
        let builder = if let Some(timeout) = timeout {
            builder.timeout(timeout)
        } else {
            builder
        };
        let client = builder
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` to the base URL's own path, so a gateway prefix such as
    /// `/api/v1` is kept in front of the operation path.
    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response body: {e}")))?;
        debug!(status, body = %body, "response received");
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse> {
        let url = self.url(path);
        debug!(%url, payload = %body, "POST");
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("POST {url} failed: {e}")))?;
        Self::read(response).await
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("GET {url} failed: {e}")))?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unparseable_base_url() {
        assert!(matches!(
            HttpTransport::new("not a url", None),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_paths_resolve_against_base() -> Result<()> {
        let transport = HttpTransport::new("http://216.10.245.166", None)?;
        assert_eq!(
            transport.url("/Library/Addbook.php").as_str(),
            "http://216.10.245.166/Library/Addbook.php"
        );
        Ok(())
    }

    #[test]
    fn test_base_path_prefix_is_kept() -> Result<()> {
        for base in ["http://gateway.example/api/v1", "http://gateway.example/api/v1/"] {
            let transport = HttpTransport::new(base, None)?;
            assert_eq!(
                transport.url("/Library/Addbook.php").as_str(),
                "http://gateway.example/api/v1/Library/Addbook.php"
            );
        }
        Ok(())
    }

    #[test]
    fn test_rejects_base_url_without_path() {
        assert!(matches!(
            HttpTransport::new("mailto:librarian@example.com", None),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() -> Result<()> {
        // Reserve a port, then release it so nothing is listening there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .map(|a| a.port())
            .map_err(|e| Error::Transport(e.to_string()))?;
        let transport = HttpTransport::new(
            &format!("http://127.0.0.1:{port}"),
            Some(Duration::from_secs(2)),
        )?;
        let result = transport.get("/Library/GetBook.php", &[("ID", "x")]).await;
        assert!(matches!(result, Err(Error::Transport(_))));
        Ok(())
    }
}
