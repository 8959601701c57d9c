use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection};
use rusqlite_migration::{Migrations, M};
use url::Url;

use crate::domain::{Article, FavoriteArticle, Locator};
use crate::store::{FavoritesStore, StoreError};

pub struct SqliteFavorites {
    conn: Mutex<Connection>,
}

impl SqliteFavorites {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| StoreError::General(format!("Migration failed: {}", e)))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::General(format!("Connection lock poisoned: {}", e)))
    }

    /// Reconstruct a DTO from nullable columns.
    ///
    /// Returns `None` when any required field is NULL, empty, or holds an
    /// unparseable URL; `list` skips such rows instead of failing.
    fn favorite_from_columns(
        rowid: i64,
        title: Option<String>,
        description: Option<String>,
        author: Option<String>,
        article_url: Option<String>,
        source: Option<String>,
        image_url: Option<String>,
    ) -> Option<FavoriteArticle> {
        Some(FavoriteArticle {
            locator: Some(Locator::new(rowid.to_string())),
            title: title.filter(|s| !s.is_empty())?,
            description: description.filter(|s| !s.is_empty())?,
            author: author.filter(|s| !s.is_empty())?,
            article_url: article_url.and_then(|s| Url::parse(&s).ok())?,
            source: source.filter(|s| !s.is_empty())?,
            image_url: image_url.and_then(|s| Url::parse(&s).ok())?,
        })
    }
}

impl FavoritesStore for SqliteFavorites {
    fn add(&self, article: &Article) -> Result<FavoriteArticle, StoreError> {
        let mut conn = self.lock()?;
        // Transaction rolls back on drop unless committed.
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO favorites (title, description, author, article_url, source, image_url, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                article.title,
                article.description,
                article.author,
                article.url.as_str(),
                article.source,
                article.image_url.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        let rowid = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!("saved favorite {} ({})", rowid, article.title);

        let mut favorite = FavoriteArticle::from(article);
        favorite.locator = Some(Locator::new(rowid.to_string()));
        Ok(favorite)
    }

    fn list(&self) -> Result<Vec<FavoriteArticle>, StoreError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, description, author, article_url, source, image_url
             FROM favorites ORDER BY saved_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Self::favorite_from_columns(
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?;

        let mut favorites = Vec::new();
        for row in rows {
            if let Some(favorite) = row? {
                favorites.push(favorite);
            }
        }

        Ok(favorites)
    }

    fn remove(&self, favorite: &FavoriteArticle) -> Result<FavoriteArticle, StoreError> {
        let locator = favorite
            .locator
            .as_ref()
            .ok_or_else(|| StoreError::General("locator missing".into()))?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let deleted = tx.execute(
            "DELETE FROM favorites WHERE id = ?1",
            params![locator.as_str()],
        )?;
        if deleted == 0 {
            return Err(StoreError::General(format!(
                "no such favorite: {}",
                locator
            )));
        }

        tx.commit()?;
        tracing::debug!("removed favorite {}", locator);

        Ok(favorite.clone())
    }
}
