//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, NewsId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The referenced news item does not exist.
        MissingNews { news_id: i64 } => "news item {news_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment and return it with its assigned id.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Comments under `news`, oldest first, ties by ascending id.
    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Fetch a single comment.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Replace a comment's text; returns `false` when it did not exist.
    async fn update_text(&self, id: CommentId, text: &str) -> Result<bool, CommentRepositoryError>;

    /// Delete a comment; returns `false` when it did not exist.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;

    /// Total number of stored comments.
    async fn count(&self) -> Result<usize, CommentRepositoryError>;
}
