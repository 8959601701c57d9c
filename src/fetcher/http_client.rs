use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::domain::ArticleBatch;
use crate::fetcher::status::StatusClass;
use crate::fetcher::wire::WireBatch;
use crate::fetcher::{normalize_query, FetchError, NewsFetch};
use crate::normalizer::Normalizer;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Sort order accepted by the news API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    PublishedAt,
    Relevancy,
    Popularity,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PublishedAt => "publishedAt",
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
        }
    }
}

/// News API client over a single HTTP GET endpoint.
///
/// Remembers the last normalized query so that page requests can be issued
/// without repeating it. Transient transport failures are retried once;
/// every other failure maps onto [`FetchError`] via the status table.
pub struct NewsApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
    language: String,
    sort_by: SortBy,
    page_size: u32,
    normalizer: Normalizer,
    last_query: Mutex<Option<String>>,
}

impl NewsApiClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::build(
            &config.base_url,
            &config.api_key,
            &config.language,
            config.sort_by,
            config.page_size,
            REQUEST_TIMEOUT,
        )
    }

    fn build(
        base_url: &str,
        api_key: &str,
        language: &str,
        sort_by: SortBy,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|_| FetchError::InvalidRequest)?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent("gazette/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            language: language.to_string(),
            sort_by,
            page_size,
            normalizer: Normalizer::new(),
            last_query: Mutex::new(None),
        })
    }

    async fn get_page(&self, query: &str, page: u32) -> Result<ArticleBatch, FetchError> {
        let params = [
            ("q", query.to_string()),
            ("apiKey", self.api_key.clone()),
            ("language", self.language.clone()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("pageSize", self.page_size.to_string()),
            ("page", page.to_string()),
        ];

        let request = self.client.get(self.base_url.clone()).query(&params);
        let retry = request.try_clone().ok_or(FetchError::InvalidRequest)?;

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => {
                tracing::debug!("transient transport failure, retrying once: {}", e);
                retry.send().await?
            }
            Err(e) => return Err(e.into()),
        };

        let status = response.status().as_u16();
        match StatusClass::of(status) {
            StatusClass::Success => {}
            StatusClass::ServerError => return Err(FetchError::Server),
            StatusClass::Unauthorized => return Err(FetchError::Unauthorized),
            StatusClass::RateLimited(reason) => return Err(FetchError::RateLimited(reason)),
            StatusClass::Unknown => return Err(FetchError::Unknown(status)),
        }

        let body = response.bytes().await?;
        let wire: WireBatch =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::debug!(
            "fetched page {} for {:?}: {} records, {} total",
            page,
            query,
            wire.articles.len(),
            wire.total_results
        );

        Ok(self.normalizer.batch(wire))
    }
}

#[async_trait]
impl NewsFetch for NewsApiClient {
    async fn search(&self, query: &str) -> Result<ArticleBatch, FetchError> {
        let query = normalize_query(query);
        *self.last_query.lock().expect("query lock poisoned") = Some(query.clone());

        self.get_page(&query, 1).await
    }

    async fn page(&self, page: u32) -> Result<ArticleBatch, FetchError> {
        let query = self
            .last_query
            .lock()
            .expect("query lock poisoned")
            .clone()
            .ok_or(FetchError::NoActiveQuery)?;

        self.get_page(&query, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> NewsApiClient {
        NewsApiClient::build(
            base_url,
            "test-key",
            "en",
            SortBy::PublishedAt,
            20,
            Duration::from_millis(200),
        )
        .unwrap()
    }

    fn ok_body() -> serde_json::Value {
        serde_json::json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"name": "Example"},
                "author": "Jane Doe",
                "title": "Title",
                "description": "Description",
                "url": "https://example.com/a/1",
                "urlToImage": "https://example.com/a/1.jpg"
            }]
        })
    }

    #[tokio::test]
    async fn test_search_sends_normalized_query_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("q", "fires"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("language", "en"))
            .and(query_param("sortBy", "publishedAt"))
            .and(query_param("pageSize", "20"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let batch = client(&server.uri()).search(" Fires ").await.unwrap();
        assert_eq!(batch.total_results, 1);
        assert_eq!(batch.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_page_reuses_last_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "fires"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server.uri());
        client.search("Fires").await.unwrap();
        client.page(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_page_without_search_fails() {
        let server = MockServer::start().await;
        let client = client(&server.uri());

        assert!(matches!(
            client.page(2).await,
            Err(FetchError::NoActiveQuery)
        ));
    }

    #[tokio::test]
    async fn test_server_error_maps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(matches!(
            client(&server.uri()).search("fires").await,
            Err(FetchError::Server)
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_maps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(matches!(
            client(&server.uri()).search("fires").await,
            Err(FetchError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_maps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(426))
            .mount(&server)
            .await;

        assert!(matches!(
            client(&server.uri()).search("fires").await,
            Err(FetchError::RateLimited("page limit"))
        ));
    }

    #[tokio::test]
    async fn test_unexpected_status_maps_to_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(matches!(
            client(&server.uri()).search("fires").await,
            Err(FetchError::Unknown(404))
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(matches!(
            client(&server.uri()).search("fires").await,
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_timeout_retries_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .expect(2)
            .mount(&server)
            .await;

        assert!(matches!(
            client(&server.uri()).search("fires").await,
            Err(FetchError::Transport(_))
        ));
    }
}
