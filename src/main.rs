use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config, cli.db)?;

    match cli.command {
        Commands::Search { query, pages, save } => {
            commands::search(&ctx, &query, pages, save).await?;
        }
        Commands::Favorites { remove } => {
            if let Some(locator) = remove {
                commands::remove_favorite(&ctx, &locator)?;
            } else {
                commands::list_favorites(&ctx)?;
            }
        }
    }

    Ok(())
}
