//! # Gazette
//!
//! A news search client with locally persisted favorites.
//!
//! ## Architecture
//!
//! Gazette follows a modular pipeline architecture:
//!
//! ```text
//! Fetcher → Normalizer → Controller → Events
//!                            ↓
//!                         Store
//! ```
//!
//! - [`fetcher`]: HTTP client for the news API, with typed status handling
//! - [`normalizer`]: lossy validation of wire records into domain articles
//! - [`controller`]: the pagination state machine, driven by commands and
//!   emitting feed events
//! - [`store`]: SQLite persistence for favorites
//!
//! ## Quick Start
//!
//! ```bash
//! # Search (first page)
//! gazette search "wildfires"
//!
//! # Fetch three pages of results
//! gazette search "wildfires" --pages 3
//!
//! # Save the second printed article
//! gazette search "wildfires" --save 2
//!
//! # List and prune favorites
//! gazette favorites
//! gazette favorites --remove 3
//! ```
//!
//! ## Modules
//!
//! - [`app`]: application context and error types
//! - [`cli`]: command-line interface definitions
//! - [`config`]: API key and endpoint configuration
//! - [`controller`]: pagination controller actor
//! - [`domain`]: core domain models (Article, FavoriteArticle)
//! - [`fetcher`]: news API fetching
//! - [`normalizer`]: wire record validation
//! - [`store`]: database persistence

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// store, fetcher, configuration.
pub mod app;

/// Command-line interface using clap.
///
/// - `search <query> [--pages N] [--save n]` - Fetch and print a feed
/// - `favorites [--remove <locator>]` - List or prune favorites
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/gazette/config.toml`; `GAZETTE_API_KEY` overrides
/// the file's API key.
pub mod config;

/// Pagination controller.
///
/// A single actor task owns the query/page state machine, consumes
/// [`Command`](controller::Command)s and broadcasts
/// [`Event`](controller::Event)s. Pagination stops silently at
/// [`MAX_PAGE`](controller::MAX_PAGE).
pub mod controller;

/// Core domain models.
///
/// - [`Article`](domain::Article): validated news article with SHA256 id
/// - [`ArticleBatch`](domain::ArticleBatch): one page plus the server total
/// - [`FavoriteArticle`](domain::FavoriteArticle): persisted favorite DTO
/// - [`Locator`](domain::Locator): opaque store-issued record token
pub mod domain;

/// News API fetching.
///
/// - [`NewsFetch`](fetcher::NewsFetch): async trait for search/page requests
/// - [`NewsApiClient`](fetcher::NewsApiClient): reqwest-based implementation
/// - [`StatusClass`](fetcher::StatusClass): table-driven status handling
pub mod fetcher;

/// Wire record validation.
///
/// Converts the API's loosely-typed JSON records into strict
/// [`Article`](domain::Article)s, silently dropping incomplete ones.
pub mod normalizer;

/// SQLite persistence layer.
///
/// - [`FavoritesStore`](store::FavoritesStore): trait defining storage operations
/// - [`SqliteFavorites`](store::SqliteFavorites): SQLite implementation
pub mod store;
