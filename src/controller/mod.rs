use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::domain::{Article, ArticleBatch, FavoriteArticle};
use crate::fetcher::{normalize_query, NewsFetch};
use crate::store::FavoritesStore;

/// Page ceiling: pagination past this page is a silent no-op.
pub const MAX_PAGE: u32 = 5;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
pub enum Command {
    Search(String),
    Paginate,
    Favorite(Article),
    Unfavorite(FavoriteArticle),
}

/// Output events consumed by the presentation layer.
#[derive(Debug, Clone)]
pub enum Event {
    FeedReplaced(ArticleBatch),
    FeedAppended(ArticleBatch),
    FavoriteAdded(FavoriteArticle),
    FavoriteRemoved(FavoriteArticle),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    NoQuery,
    Loaded { query: String, page: u32 },
}

/// Owns the feed state machine: current query, current page, and the
/// append-vs-replace decision.
///
/// Commands are handled one at a time; each fetch or store call completes
/// before the next command is taken, so Search and Paginate responses can
/// never interleave and the page counter only moves on success.
pub struct Controller {
    fetcher: Arc<dyn NewsFetch + Send + Sync>,
    store: Arc<dyn FavoritesStore>,
    state: QueryState,
    seen: HashSet<String>,
    events: broadcast::Sender<Event>,
}

impl Controller {
    pub fn new(
        fetcher: Arc<dyn NewsFetch + Send + Sync>,
        store: Arc<dyn FavoritesStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            fetcher,
            store,
            state: QueryState::NoQuery,
            seen: HashSet::new(),
            events,
        }
    }

    /// Spawn the controller as an actor task, returning its handle.
    pub fn spawn(
        fetcher: Arc<dyn NewsFetch + Send + Sync>,
        store: Arc<dyn FavoritesStore>,
    ) -> ControllerHandle {
        let mut controller = Self::new(fetcher, store);
        let (commands, mut rx) = mpsc::unbounded_channel();
        let events = controller.events.clone();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                controller.handle(command).await;
            }
            tracing::debug!("controller command channel closed");
        });

        ControllerHandle { commands, events }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub async fn handle(&mut self, command: Command) {
        match command {
            Command::Search(text) => self.search(text).await,
            Command::Paginate => self.paginate().await,
            Command::Favorite(article) => self.favorite(article),
            Command::Unfavorite(favorite) => self.unfavorite(favorite),
        }
    }

    async fn search(&mut self, text: String) {
        // A fresh search always attempts, whatever the current state.
        match self.fetcher.search(&text).await {
            Ok(batch) => {
                self.seen = batch.articles.iter().map(|a| a.id.clone()).collect();
                self.state = QueryState::Loaded {
                    query: normalize_query(&text),
                    page: 1,
                };
                self.emit(Event::FeedReplaced(batch));
            }
            Err(e) => self.emit(Event::Error(e.to_string())),
        }
    }

    async fn paginate(&mut self) {
        let (query, page) = match &self.state {
            // No active query: no-op, not an error.
            QueryState::NoQuery => return,
            QueryState::Loaded { query, page } => (query.clone(), *page),
        };

        if page == MAX_PAGE {
            tracing::debug!("page ceiling {} reached for {:?}", MAX_PAGE, query);
            return;
        }

        let next = page + 1;
        match self.fetcher.page(next).await {
            Ok(batch) => {
                // Drop articles already emitted for this query.
                let articles: Vec<Article> = batch
                    .articles
                    .into_iter()
                    .filter(|a| self.seen.insert(a.id.clone()))
                    .collect();

                self.state = QueryState::Loaded { query, page: next };
                self.emit(Event::FeedAppended(ArticleBatch {
                    total_results: batch.total_results,
                    articles,
                }));
            }
            // Page counter is untouched; the same page can be retried.
            Err(e) => self.emit(Event::Error(e.to_string())),
        }
    }

    fn favorite(&mut self, article: Article) {
        match self.store.add(&article) {
            Ok(favorite) => self.emit(Event::FavoriteAdded(favorite)),
            Err(e) => self.emit(Event::Error(e.to_string())),
        }
    }

    fn unfavorite(&mut self, favorite: FavoriteArticle) {
        match self.store.remove(&favorite) {
            Ok(removed) => self.emit(Event::FavoriteRemoved(removed)),
            Err(e) => self.emit(Event::Error(e.to_string())),
        }
    }

    fn emit(&self, event: Event) {
        // Send fails only when no subscriber is listening.
        let _ = self.events.send(event);
    }
}

/// Cheap, cloneable handle to a spawned [`Controller`].
#[derive(Clone)]
pub struct ControllerHandle {
    commands: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<Event>,
}

impl ControllerHandle {
    pub fn search(&self, query: impl Into<String>) {
        self.send(Command::Search(query.into()));
    }

    pub fn paginate(&self) {
        self.send(Command::Paginate);
    }

    pub fn favorite(&self, article: Article) {
        self.send(Command::Favorite(article));
    }

    pub fn unfavorite(&self, favorite: FavoriteArticle) {
        self.send(Command::Unfavorite(favorite));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::warn!("controller task is gone, dropping command");
        }
    }
}
