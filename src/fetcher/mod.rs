pub mod http_client;
pub mod status;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ArticleBatch;

pub use http_client::NewsApiClient;
pub use status::StatusClass;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Internal server error")]
    Server,

    #[error("Api key isn't provided")]
    Unauthorized,

    #[error("Rate limited: {0}")]
    RateLimited(&'static str),

    #[error("Unexpected status code: {0}")]
    Unknown(u16),

    #[error("Failed decoding response: {0}")]
    Decode(String),

    #[error("There is no query")]
    NoActiveQuery,

    #[error("Could not build request URL")]
    InvalidRequest,
}

#[async_trait]
pub trait NewsFetch {
    /// Search for `query`, resetting the active query and returning page 1.
    ///
    /// The query is normalized (trimmed, lower-cased) before the request and
    /// remembered for subsequent [`page`](NewsFetch::page) calls.
    async fn search(&self, query: &str) -> Result<ArticleBatch, FetchError>;

    /// Fetch `page` of the active query.
    ///
    /// Fails with [`FetchError::NoActiveQuery`] if no search has been issued.
    async fn page(&self, page: u32) -> Result<ArticleBatch, FetchError>;
}

/// Lower-case and trim a search query.
///
/// Idempotent, so retrying with an already normalized query is harmless.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
