//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentInput, Error, NewsId, UserId};

/// Request to comment on a news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub news: NewsId,
    pub author: UserId,
    pub input: CommentInput,
}

/// Request to change the text of an owned comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommentRequest {
    pub id: CommentId,
    pub author: UserId,
    pub input: CommentInput,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Moderate and store a comment stamped with the current time.
    async fn add(&self, request: AddCommentRequest) -> Result<Comment, Error>;

    /// Moderate and apply new text to the author's comment.
    async fn edit(&self, request: EditCommentRequest) -> Result<Comment, Error>;

    /// Delete the author's comment, returning the news item it belonged to.
    async fn delete(&self, author: UserId, id: CommentId) -> Result<NewsId, Error>;
}
