//! Port for news item persistence.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{News, NewsId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by news repository adapters.
    pub enum NewsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "news repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "news repository query failed: {message}",
    }
}

/// News row with its date resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRecord {
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert one news item.
    async fn insert(&self, news: &NewsRecord) -> Result<News, NewsRepositoryError>;

    /// Insert several news items in one statement; returns the number inserted.
    async fn bulk_insert(&self, news: &[NewsRecord]) -> Result<usize, NewsRepositoryError>;

    /// At most `limit` items, newest date first, ties by descending id.
    async fn latest(&self, limit: usize) -> Result<Vec<News>, NewsRepositoryError>;

    /// Fetch a single news item.
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError>;
}
