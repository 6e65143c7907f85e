//! Driving port for reading notes.

use async_trait::async_trait;

use crate::domain::{Error, Note, Slug, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Notes written by `author`.
    async fn list(&self, author: UserId) -> Result<Vec<Note>, Error>;

    /// A note the author owns; not-found otherwise.
    async fn get_owned(&self, author: UserId, slug: Slug) -> Result<Note, Error>;
}
