use serde::Deserialize;

/// One page of the news API's `/v2/everything` response, as received.
///
/// Everything except the article URL is optional at the wire level; the
/// normalizer decides what survives.
#[derive(Debug, Clone, Deserialize)]
pub struct WireBatch {
    #[serde(rename = "totalResults")]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<WireArticle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub url: String,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    pub source: Option<WireSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireSource {
    pub name: Option<String>,
}
