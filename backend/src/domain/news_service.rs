//! News and comments domain service.
//!
//! Reads are public. Comment mutations are moderated by the configured
//! banned-word filter and gated on authorship; a foreign comment is
//! reported as not found.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AddCommentRequest, CommentRepository, CommentRepositoryError, CommentsCommand,
    EditCommentRequest, NewsQuery, NewsRecord, NewsRepository, NewsRepositoryError,
};
use crate::domain::{
    Comment, CommentId, CommentInput, CommentModeration, Error, NEWS_TITLE_MAX, NewComment,
    NewNews, News, NewsDetail, NewsId, UserId,
};

/// Runtime knobs for [`NewsService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSettings {
    /// Maximum number of items on the home page.
    pub home_page_size: usize,
    /// Comment filter.
    pub moderation: CommentModeration,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            home_page_size: crate::domain::NEWS_COUNT_ON_HOME_PAGE,
            moderation: CommentModeration::default(),
        }
    }
}

/// News service implementing [`NewsQuery`] and [`CommentsCommand`].
pub struct NewsService<N: ?Sized, C: ?Sized> {
    news: Arc<N>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
    settings: NewsSettings,
}

impl<N: ?Sized, C: ?Sized> Clone for NewsService<N, C> {
    fn clone(&self) -> Self {
        Self {
            news: Arc::clone(&self.news),
            comments: Arc::clone(&self.comments),
            clock: Arc::clone(&self.clock),
            settings: self.settings.clone(),
        }
    }
}

impl<N: ?Sized, C: ?Sized> NewsService<N, C> {
    /// Create a new service with the given repositories.
    pub fn new(
        news: Arc<N>,
        comments: Arc<C>,
        clock: Arc<dyn Clock>,
        settings: NewsSettings,
    ) -> Self {
        Self {
            news,
            comments,
            clock,
            settings,
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &NewsSettings {
        &self.settings
    }
}

impl<N, C> NewsService<N, C>
where
    N: NewsRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    fn map_news_error(error: NewsRepositoryError) -> Error {
        match error {
            NewsRepositoryError::Connection { message } => {
                warn!(kind = "connection", %message, "news repository unavailable");
                Error::service_unavailable(format!("news repository unavailable: {message}"))
            }
            NewsRepositoryError::Query { message } => {
                warn!(kind = "query", %message, "news repository query failed");
                Error::internal(format!("news repository error: {message}"))
            }
        }
    }

    fn map_comment_error(error: CommentRepositoryError) -> Error {
        match error {
            CommentRepositoryError::Connection { message } => {
                warn!(kind = "connection", %message, "comment repository unavailable");
                Error::service_unavailable(format!("comment repository unavailable: {message}"))
            }
            CommentRepositoryError::Query { message } => {
                warn!(kind = "query", %message, "comment repository query failed");
                Error::internal(format!("comment repository error: {message}"))
            }
            CommentRepositoryError::MissingNews { .. } => Self::news_not_found(),
        }
    }

    fn news_not_found() -> Error {
        Error::not_found("news not found")
    }

    fn comment_not_found() -> Error {
        Error::not_found("comment not found")
    }

    fn record(&self, news: NewNews) -> Result<NewsRecord, Error> {
        let NewNews { title, text, date } = news;
        if title.trim().is_empty() || title.chars().count() > NEWS_TITLE_MAX {
            return Err(Error::invalid_request(format!(
                "news title must be 1 to {NEWS_TITLE_MAX} characters"
            )));
        }
        Ok(NewsRecord {
            title,
            text,
            date: date.unwrap_or_else(|| self.clock.utc().date_naive()),
        })
    }

    fn moderate(&self, input: &CommentInput) -> Result<String, Error> {
        input.validate(&self.settings.moderation).map_err(|errors| {
            debug!(fields = ?errors, "comment rejected");
            Error::validation(errors)
        })
    }

    async fn require_news(&self, id: NewsId) -> Result<News, Error> {
        self.news
            .find_by_id(id)
            .await
            .map_err(Self::map_news_error)?
            .ok_or_else(Self::news_not_found)
    }

    async fn find_owned_comment(&self, author: UserId, id: CommentId) -> Result<Comment, Error> {
        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(Self::map_comment_error)?;
        comment
            .filter(|comment| comment.author == author)
            .ok_or_else(Self::comment_not_found)
    }

    /// Publish a news item dated today (UTC) unless a date is given.
    pub async fn publish(&self, news: NewNews) -> Result<News, Error> {
        let record = self.record(news)?;
        let stored = self
            .news
            .insert(&record)
            .await
            .map_err(Self::map_news_error)?;
        info!(news_id = %stored.id, date = %stored.date, "news published");
        Ok(stored)
    }

    /// Publish several news items in one write.
    pub async fn publish_many(&self, news: Vec<NewNews>) -> Result<usize, Error> {
        let records = news
            .into_iter()
            .map(|item| self.record(item))
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = self
            .news
            .bulk_insert(&records)
            .await
            .map_err(Self::map_news_error)?;
        info!(count = inserted, "news bulk inserted");
        Ok(inserted)
    }
}

#[async_trait]
impl<N, C> NewsQuery for NewsService<N, C>
where
    N: NewsRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    async fn home(&self) -> Result<Vec<News>, Error> {
        self.news
            .latest(self.settings.home_page_size)
            .await
            .map_err(Self::map_news_error)
    }

    async fn detail(&self, id: NewsId) -> Result<NewsDetail, Error> {
        let news = self.require_news(id).await?;
        let comments = self
            .comments
            .list_for_news(id)
            .await
            .map_err(Self::map_comment_error)?;
        Ok(NewsDetail { news, comments })
    }

    async fn owned_comment(&self, author: UserId, id: CommentId) -> Result<Comment, Error> {
        self.find_owned_comment(author, id).await
    }
}

#[async_trait]
impl<N, C> CommentsCommand for NewsService<N, C>
where
    N: NewsRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    async fn add(&self, request: AddCommentRequest) -> Result<Comment, Error> {
        let AddCommentRequest {
            news,
            author,
            input,
        } = request;
        self.require_news(news).await?;
        let text = self.moderate(&input)?;

        let comment = self
            .comments
            .insert(&NewComment {
                news,
                author,
                text,
                created: self.clock.utc(),
            })
            .await
            .map_err(Self::map_comment_error)?;
        info!(comment_id = %comment.id, news_id = %news, %author, "comment created");
        Ok(comment)
    }

    async fn edit(&self, request: EditCommentRequest) -> Result<Comment, Error> {
        let EditCommentRequest { id, author, input } = request;
        let current = self.find_owned_comment(author, id).await?;
        let text = self.moderate(&input)?;

        let found = self
            .comments
            .update_text(id, &text)
            .await
            .map_err(Self::map_comment_error)?;
        if !found {
            return Err(Self::comment_not_found());
        }
        info!(comment_id = %id, news_id = %current.news, %author, "comment edited");
        Ok(Comment { text, ..current })
    }

    async fn delete(&self, author: UserId, id: CommentId) -> Result<NewsId, Error> {
        let comment = self.find_owned_comment(author, id).await?;
        let deleted = self
            .comments
            .delete(id)
            .await
            .map_err(Self::map_comment_error)?;
        if !deleted {
            return Err(Self::comment_not_found());
        }
        info!(comment_id = %id, news_id = %comment.news, %author, "comment deleted");
        Ok(comment.news)
    }
}

#[cfg(test)]
#[path = "news_service_tests.rs"]
mod tests;
