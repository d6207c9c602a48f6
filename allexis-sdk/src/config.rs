//! Configuration for the SDK
//!
//! `SdkConfig` controls where the feed is fetched from, which placeholder
//! price is quoted, and how the shared channel treats failing listeners.

use allexis_channel::DispatchPolicy;
use reqwest::Url;

use crate::error::{Result, SdkError};

/// Default feed endpoint
pub const DEFAULT_FEED_ENDPOINT: &str = "https://api.myjson.com/bins/m0znl";

/// Price quoted for every product until real pricing exists
pub const DEFAULT_PLACEHOLDER_PRICE: &str = "R 20,00";

/// Configuration for [`AllexisSdk`](crate::AllexisSdk)
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// URL fetched by `get_feed`
    /// Default: `https://api.myjson.com/bins/m0znl`
    pub feed_endpoint: String,

    /// Price string returned by `get_price_for_product`
    /// Default: `R 20,00`
    pub placeholder_price: String,

    /// Listener failure policy of the shared channel
    /// Default: fail fast
    pub dispatch_policy: DispatchPolicy,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            feed_endpoint: DEFAULT_FEED_ENDPOINT.to_string(),
            placeholder_price: DEFAULT_PLACEHOLDER_PRICE.to_string(),
            dispatch_policy: DispatchPolicy::FailFast,
        }
    }
}

impl SdkConfig {
    /// Create a new SdkConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from environment variables, falling back to defaults
    ///
    /// - `ALLEXIS_FEED_URL`: feed endpoint
    /// - `ALLEXIS_PLACEHOLDER_PRICE`: quoted price
    /// - `ALLEXIS_DISPATCH_POLICY`: `fail-fast` or `isolate`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("ALLEXIS_FEED_URL") {
            config.feed_endpoint = url;
        }
        if let Ok(price) = std::env::var("ALLEXIS_PLACEHOLDER_PRICE") {
            config.placeholder_price = price;
        }
        if let Ok(policy) = std::env::var("ALLEXIS_DISPATCH_POLICY") {
            config.dispatch_policy = parse_dispatch_policy(&policy)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the feed endpoint
    pub fn with_feed_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.feed_endpoint = endpoint.into();
        self
    }

    /// Set the placeholder price
    pub fn with_placeholder_price(mut self, price: impl Into<String>) -> Self {
        self.placeholder_price = price.into();
        self
    }

    /// Set the channel dispatch policy
    pub fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }

    /// Check that the feed endpoint is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        self.feed_url().map(|_| ())
    }

    /// The feed endpoint, parsed
    pub(crate) fn feed_url(&self) -> Result<Url> {
        let url = Url::parse(&self.feed_endpoint)
            .map_err(|e| SdkError::InvalidEndpoint(format!("{}: {}", self.feed_endpoint, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SdkError::InvalidEndpoint(format!(
                "{}: unsupported scheme '{}'",
                self.feed_endpoint, other
            ))),
        }
    }
}

fn parse_dispatch_policy(value: &str) -> Result<DispatchPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "fail-fast" | "failfast" | "fail_fast" => Ok(DispatchPolicy::FailFast),
        "isolate" => Ok(DispatchPolicy::Isolate),
        _ => Err(SdkError::InvalidConfig {
            key: "ALLEXIS_DISPATCH_POLICY",
            value: value.to_string(),
        }),
    }
}
