//! Driving port for note mutations.
//!
//! Every operation is scoped to the acting author. A slug that is missing or
//! belongs to somebody else produces the same not-found error.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteInput, Slug, UserId};

/// Request to create a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNoteRequest {
    pub author: UserId,
    pub input: NoteInput,
}

/// Request to edit a note addressed by its current slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditNoteRequest {
    pub author: UserId,
    pub slug: Slug,
    pub input: NoteInput,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Validate and store a new note.
    ///
    /// # Errors
    /// Validation failures (including a taken slug) are returned as
    /// [`Error::validation`] before anything is written.
    async fn create(&self, request: CreateNoteRequest) -> Result<Note, Error>;

    /// Validate and apply an edit to the author's note.
    async fn edit(&self, request: EditNoteRequest) -> Result<Note, Error>;

    /// Delete the author's note.
    async fn delete(&self, author: UserId, slug: Slug) -> Result<(), Error>;
}
