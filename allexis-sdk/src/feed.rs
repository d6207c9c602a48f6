//! Feed client
//!
//! A single GET against the configured endpoint, body parsed as JSON. No
//! retry and no timeout; failures are returned to the caller unchanged.

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::config::SdkConfig;
use crate::error::Result;

/// HTTP client for the product feed
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl FeedClient {
    /// Create a client for the endpoint in `config`
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidEndpoint` if the endpoint is not an http(s) URL.
    pub fn new(config: &SdkConfig) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.feed_url()?,
        })
    }

    /// The endpoint every feed request goes to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch and parse the feed
    ///
    /// `feed_id` is only used for logging; the endpoint serves a single feed.
    /// The HTTP status is not inspected, so an error page surfaces as a
    /// parse failure.
    pub async fn get_feed(&self, feed_id: &str) -> Result<Value> {
        debug!("Fetching feed {} from {}", feed_id, self.endpoint);

        let body = self.http.get(self.endpoint.clone()).send().await?.text().await?;
        let payload = serde_json::from_str(&body)?;

        debug!("Feed {} received ({} bytes)", feed_id, body.len());
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    #[test]
    fn test_client_uses_config_endpoint() {
        let config = SdkConfig::new().with_feed_endpoint("http://127.0.0.1:9/bins/feed");
        let client = FeedClient::new(&config).unwrap();

        assert_eq!(client.endpoint().path(), "/bins/feed");
    }

    #[test]
    fn test_client_rejects_bad_endpoint() {
        let config = SdkConfig::new().with_feed_endpoint("feed.json");
        assert!(matches!(FeedClient::new(&config), Err(SdkError::InvalidEndpoint(_))));
    }
}
