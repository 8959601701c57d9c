use std::fmt;

use url::Url;

use crate::domain::Article;

/// Opaque token identifying a persisted favorite.
///
/// Issued by the store on a successful `add` or `list`; required for `remove`.
/// Callers never construct one from article data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A favorite as the store hands it out.
///
/// Carries the descriptive fields of an [`Article`] plus the locator of the
/// underlying record. `locator` is `None` for a favorite that has not been
/// persisted yet; the store returns copies with it filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteArticle {
    pub locator: Option<Locator>,
    pub title: String,
    pub description: String,
    pub author: String,
    pub article_url: Url,
    pub source: String,
    pub image_url: Url,
}

impl From<&Article> for FavoriteArticle {
    fn from(article: &Article) -> Self {
        Self {
            locator: None,
            title: article.title.clone(),
            description: article.description.clone(),
            author: article.author.clone(),
            article_url: article.url.clone(),
            source: article.source.clone(),
            image_url: article.image_url.clone(),
        }
    }
}
