pub mod sqlite;

use thiserror::Error;

use crate::domain::{Article, FavoriteArticle};

pub use sqlite::SqliteFavorites;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    General(String),
}

/// Local durable store for favorite articles.
///
/// Writes go through a serialized connection and commit (or roll back)
/// before the result is returned; each operation is individually atomic.
pub trait FavoritesStore: Send + Sync {
    /// Persist a new favorite derived from `article`, returning the stored
    /// DTO with its newly issued locator.
    fn add(&self, article: &Article) -> Result<FavoriteArticle, StoreError>;

    /// All persisted favorites, newest first. Records missing a required
    /// descriptive field are skipped silently.
    fn list(&self) -> Result<Vec<FavoriteArticle>, StoreError>;

    /// Delete the record behind `favorite`'s locator and return the DTO.
    ///
    /// Fails with `General("locator missing")` for a favorite that was
    /// never persisted.
    fn remove(&self, favorite: &FavoriteArticle) -> Result<FavoriteArticle, StoreError>;
}
