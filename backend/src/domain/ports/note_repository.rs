//! Port for note persistence.
//!
//! Adapters back the `notes.slug` uniqueness with a constraint and report a
//! violation as [`NoteRepositoryError::DuplicateSlug`]; services still check
//! up front so the form error is raised before any write.

use async_trait::async_trait;

use crate::domain::{NewNote, Note, NoteId, Slug, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
        /// Another note already uses the slug.
        DuplicateSlug { slug: String } => "note slug {slug} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note and return it with its assigned id.
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError>;

    /// Insert several notes in one statement; returns the number inserted.
    async fn bulk_insert(&self, notes: &[NewNote]) -> Result<usize, NoteRepositoryError>;

    /// Fetch a note by slug regardless of author.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError>;

    /// Notes written by `author`, ordered by id.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Overwrite title, text, and slug of an existing note.
    ///
    /// Returns `false` when no note has `note.id`.
    async fn update(&self, note: &Note) -> Result<bool, NoteRepositoryError>;

    /// Delete a note; returns `false` when it did not exist.
    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError>;

    /// Total number of stored notes.
    async fn count(&self) -> Result<usize, NoteRepositoryError>;
}
