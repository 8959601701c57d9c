use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{GazetteError, Result};
use crate::config::Config;
use crate::fetcher::{NewsApiClient, NewsFetch};
use crate::store::{FavoritesStore, SqliteFavorites};

/// Wires the fetch client and favorites store together for the CLI.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn NewsFetch + Send + Sync>,
    pub store: Arc<dyn FavoritesStore>,
}

impl AppContext {
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let fetcher: Arc<dyn NewsFetch + Send + Sync> = Arc::new(NewsApiClient::new(&config)?);
        let store: Arc<dyn FavoritesStore> = Arc::new(SqliteFavorites::new(&db_path)?);

        Ok(Self {
            config,
            fetcher,
            store,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GazetteError::Other("Could not find data directory".into()))?;
        let gazette_dir = data_dir.join("gazette");
        std::fs::create_dir_all(&gazette_dir)?;
        Ok(gazette_dir.join("gazette.db"))
    }
}
