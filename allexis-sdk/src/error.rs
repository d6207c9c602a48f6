use allexis_channel::ChannelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid feed endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
