//! Driving port for reading news and comments.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Error, News, NewsDetail, NewsId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsQuery: Send + Sync {
    /// Home page listing: newest first, capped at the configured count.
    async fn home(&self) -> Result<Vec<News>, Error>;

    /// A news item with its comments in creation order.
    async fn detail(&self, id: NewsId) -> Result<NewsDetail, Error>;

    /// A comment the author owns; not-found otherwise.
    async fn owned_comment(&self, author: UserId, id: CommentId) -> Result<Comment, Error>;
}
