use crate::app::{AppContext, GazetteError, Result};
use crate::controller::{Controller, Event, MAX_PAGE};
use crate::domain::Article;

pub async fn search(ctx: &AppContext, query: &str, pages: u32, save: Option<usize>) -> Result<()> {
    let pages = pages.clamp(1, MAX_PAGE);

    let handle = Controller::spawn(ctx.fetcher.clone(), ctx.store.clone());
    let mut events = handle.subscribe();

    handle.search(query);
    for _ in 1..pages {
        handle.paginate();
    }

    let mut feed: Vec<Article> = Vec::new();
    for page in 0..pages {
        match events.recv().await {
            Ok(Event::FeedReplaced(batch)) => {
                println!("{} results for \"{}\"", batch.total_results, query.trim());
                print_articles(&batch.articles, 0);
                feed = batch.articles;
            }
            Ok(Event::FeedAppended(batch)) => {
                print_articles(&batch.articles, feed.len());
                feed.extend(batch.articles);
            }
            Ok(Event::Error(message)) => {
                // A failed search means every queued paginate is a no-op.
                if page == 0 {
                    return Err(GazetteError::Other(message));
                }
                eprintln!("Error: {}", message);
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }

    if let Some(n) = save {
        let article = n
            .checked_sub(1)
            .and_then(|i| feed.get(i))
            .cloned()
            .ok_or_else(|| GazetteError::Other(format!("No article #{} in the feed", n)))?;

        handle.favorite(article);
        match events.recv().await {
            Ok(Event::FavoriteAdded(favorite)) => match favorite.locator {
                Some(locator) => println!("Saved favorite {} ({})", locator, favorite.title),
                None => println!("Saved favorite ({})", favorite.title),
            },
            Ok(Event::Error(message)) => return Err(GazetteError::Other(message)),
            _ => return Err(GazetteError::Other("Controller stopped".into())),
        }
    }

    Ok(())
}

pub fn list_favorites(ctx: &AppContext) -> Result<()> {
    let favorites = ctx.store.list()?;

    if favorites.is_empty() {
        println!("No favorites saved");
        return Ok(());
    }

    for favorite in favorites {
        if let Some(locator) = &favorite.locator {
            println!("[{}] {} ({})", locator, favorite.title, favorite.source);
            println!("    {}", favorite.article_url);
        }
    }

    Ok(())
}

pub fn remove_favorite(ctx: &AppContext, locator: &str) -> Result<()> {
    let favorite = ctx
        .store
        .list()?
        .into_iter()
        .find(|f| f.locator.as_ref().is_some_and(|l| l.as_str() == locator))
        .ok_or_else(|| GazetteError::Other(format!("No favorite with locator {}", locator)))?;

    ctx.store.remove(&favorite)?;
    println!("Removed: {}", favorite.title);
    Ok(())
}

fn print_articles(articles: &[Article], offset: usize) {
    for (i, article) in articles.iter().enumerate() {
        println!("{:2}. {} — {} ({})", offset + i + 1, article.title, article.author, article.source);
        println!("    {}", article.url);
    }
}
