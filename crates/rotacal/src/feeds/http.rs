use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use rotacal_core::cache::{FetchError, Fetcher};

/// Fetches raw response bodies over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self::new(client))
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

/// Validates `url` as an absolute http(s) URL.
pub fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::Request(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::Request(format!(
            "{url}: unsupported scheme {scheme}"
        ))),
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    type Output = String;

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = parse_http_url(url)?;

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        tracing::debug!(url, bytes = body.len(), "Fetched resource body");
        Ok(body)
    }
}
