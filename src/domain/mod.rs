pub mod article;
pub mod favorite;

pub use article::{Article, ArticleBatch};
pub use favorite::{FavoriteArticle, Locator};
