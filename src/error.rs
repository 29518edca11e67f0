/// Error types for Tabby
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabbyError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to parse imported tab list: {0}")]
    Import(#[source] serde_json::Error),

    #[error("Failed to serialize tab list: {0}")]
    Export(#[source] serde_json::Error),

    #[error("Browser call failed: {0}")]
    Host(String),
}
