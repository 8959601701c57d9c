pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "Search news articles and keep favorites", long_about = None)]
pub struct Cli {
    /// Path to the favorites database (default: ~/.local/share/gazette/gazette.db)
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search articles and print the resulting feed
    Search {
        /// Search query
        query: String,

        /// Number of pages to fetch (capped at 5)
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Save the n-th printed article as a favorite
        #[arg(short, long)]
        save: Option<usize>,
    },
    /// List saved favorites
    Favorites {
        /// Remove the favorite with this locator instead of listing
        #[arg(long)]
        remove: Option<String>,
    },
}
