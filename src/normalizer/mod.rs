use url::Url;

use crate::domain::{Article, ArticleBatch};
use crate::fetcher::wire::{WireArticle, WireBatch};

/// Converts loosely-typed wire records into strict domain articles.
///
/// Validation is lossy by design: a record failing any rule is dropped
/// silently rather than surfaced as an error. A batch of N wire records
/// yields M <= N articles.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Validate one wire record.
    ///
    /// Rules, in order: title, description, author and source name must be
    /// present and non-empty; the article URL must parse as an absolute URL;
    /// the image URL must be present, parse, and have scheme `https`.
    pub fn article(&self, wire: &WireArticle) -> Option<Article> {
        let title = non_empty(wire.title.as_deref())?;
        let description = non_empty(wire.description.as_deref())?;
        let author = non_empty(wire.author.as_deref())?;
        let source = non_empty(wire.source.as_ref().and_then(|s| s.name.as_deref()))?;
        let url = Url::parse(&wire.url).ok()?;
        let image_url = wire
            .url_to_image
            .as_deref()
            .and_then(|s| Url::parse(s).ok())
            .filter(|u| u.scheme() == "https")?;

        Some(Article {
            id: Article::generate_id(&url),
            title: title.to_string(),
            description: description.to_string(),
            author: author.to_string(),
            source: source.to_string(),
            url,
            image_url,
        })
    }

    /// Validate a whole page, keeping the server-reported total.
    pub fn batch(&self, wire: WireBatch) -> ArticleBatch {
        let received = wire.articles.len();
        let articles: Vec<Article> = wire
            .articles
            .iter()
            .filter_map(|record| {
                let article = self.article(record);
                if article.is_none() {
                    tracing::debug!("dropping invalid article record: {}", record.url);
                }
                article
            })
            .collect();

        if articles.len() < received {
            tracing::debug!(
                "validated {} of {} received records",
                articles.len(),
                received
            );
        }

        ArticleBatch {
            total_results: wire.total_results,
            articles,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
