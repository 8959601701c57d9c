use sha2::{Digest, Sha256};
use url::Url;

/// A fully validated news article.
///
/// Only the normalizer constructs these; by the time an `Article` exists,
/// every field is non-empty, both URLs parsed, and the image URL is https.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub source: String,
    pub url: Url,
    pub image_url: Url,
}

impl Article {
    /// Generate a deterministic ID from the canonical article URL.
    ///
    /// Used for feed diffing and in-session de-duplication only; persisted
    /// favorites are identified by a store-issued locator instead.
    pub fn generate_id(url: &Url) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// One page of validated articles plus the server-reported result count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBatch {
    pub total_results: u64,
    pub articles: Vec<Article>,
}
