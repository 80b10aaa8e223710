//! ColorFetcher trait and HttpFetcher (reqwest wrapper).

use std::time::Duration;

use crate::error::FetchError;

/// Per-request timeout used by [`HttpFetcher::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for fetching the current color text. Enables mock injection for testing.
pub trait ColorFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Real fetcher issuing one HTTP GET per call.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cheerlights/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shared connection pool, custom TLS, ...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ColorFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_request(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_body(&e))?;
        tracing::debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}
