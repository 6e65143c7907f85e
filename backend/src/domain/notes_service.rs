//! Notes domain service.
//!
//! Implements the notes driving ports on top of a [`NoteRepository`]. All
//! reads and writes are scoped to the acting author; a note that exists but
//! belongs to someone else is reported exactly like a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateNoteRequest, EditNoteRequest, NoteRepository, NoteRepositoryError, NotesCommand,
    NotesQuery,
};
use crate::domain::{
    Error, FieldErrors, NewNote, Note, NoteDraft, NoteId, NoteInput, Slug, UserId,
    duplicate_slug_message,
};

/// Notes service implementing [`NotesCommand`] and [`NotesQuery`].
pub struct NotesService<R: ?Sized> {
    notes: Arc<R>,
}

impl<R: ?Sized> Clone for NotesService<R> {
    fn clone(&self) -> Self {
        Self {
            notes: Arc::clone(&self.notes),
        }
    }
}

impl<R: ?Sized> NotesService<R> {
    /// Create a new service over the given repository.
    pub fn new(notes: Arc<R>) -> Self {
        Self { notes }
    }
}

impl<R> NotesService<R>
where
    R: NoteRepository + ?Sized,
{
    fn map_repository_error(error: NoteRepositoryError) -> Error {
        match error {
            NoteRepositoryError::Connection { message } => {
                warn!(kind = "connection", %message, "note repository unavailable");
                Error::service_unavailable(format!("note repository unavailable: {message}"))
            }
            NoteRepositoryError::Query { message } => {
                warn!(kind = "query", %message, "note repository query failed");
                Error::internal(format!("note repository error: {message}"))
            }
            NoteRepositoryError::DuplicateSlug { slug } => {
                Error::validation(FieldErrors::single("slug", duplicate_slug_message(&slug)))
            }
        }
    }

    fn not_found() -> Error {
        Error::not_found("note not found")
    }

    /// Fail validation when another note already uses `slug`.
    async fn ensure_slug_available(&self, slug: &Slug, owner: Option<NoteId>) -> Result<(), Error> {
        let existing = self
            .notes
            .find_by_slug(slug)
            .await
            .map_err(Self::map_repository_error)?;
        match existing {
            Some(note) if Some(note.id) != owner => Err(Error::validation(FieldErrors::single(
                "slug",
                duplicate_slug_message(slug.as_str()),
            ))),
            _ => Ok(()),
        }
    }

    async fn find_owned(&self, author: UserId, slug: &Slug) -> Result<Note, Error> {
        let note = self
            .notes
            .find_by_slug(slug)
            .await
            .map_err(Self::map_repository_error)?;
        note.filter(|note| note.author == author)
            .ok_or_else(Self::not_found)
    }

    fn validate(input: &NoteInput) -> Result<NoteDraft, Error> {
        input.validate().map_err(Error::validation)
    }

    /// Store several notes at once.
    ///
    /// Used for seeding; skips form validation but not the storage
    /// constraints.
    pub async fn bulk_create(&self, notes: Vec<NewNote>) -> Result<usize, Error> {
        let inserted = self
            .notes
            .bulk_insert(&notes)
            .await
            .map_err(Self::map_repository_error)?;
        info!(count = inserted, "notes bulk inserted");
        Ok(inserted)
    }
}

#[async_trait]
impl<R> NotesCommand for NotesService<R>
where
    R: NoteRepository + ?Sized,
{
    async fn create(&self, request: CreateNoteRequest) -> Result<Note, Error> {
        let CreateNoteRequest { author, input } = request;
        let NoteDraft { title, text, slug } = Self::validate(&input)?;
        self.ensure_slug_available(&slug, None).await?;

        let note = self
            .notes
            .insert(&NewNote {
                title,
                text,
                slug,
                author,
            })
            .await
            .map_err(Self::map_repository_error)?;
        info!(note_id = %note.id, slug = %note.slug, %author, "note created");
        Ok(note)
    }

    async fn edit(&self, request: EditNoteRequest) -> Result<Note, Error> {
        let EditNoteRequest {
            author,
            slug,
            input,
        } = request;
        let current = self.find_owned(author, &slug).await?;
        let NoteDraft { title, text, slug } = Self::validate(&input)?;
        self.ensure_slug_available(&slug, Some(current.id)).await?;

        let updated = Note {
            title,
            text,
            slug,
            ..current
        };
        let found = self
            .notes
            .update(&updated)
            .await
            .map_err(Self::map_repository_error)?;
        if !found {
            return Err(Self::not_found());
        }
        info!(note_id = %updated.id, slug = %updated.slug, %author, "note updated");
        Ok(updated)
    }

    async fn delete(&self, author: UserId, slug: Slug) -> Result<(), Error> {
        let note = self.find_owned(author, &slug).await?;
        let deleted = self
            .notes
            .delete(note.id)
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Self::not_found());
        }
        info!(note_id = %note.id, %slug, %author, "note deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> NotesQuery for NotesService<R>
where
    R: NoteRepository + ?Sized,
{
    async fn list(&self, author: UserId) -> Result<Vec<Note>, Error> {
        self.notes
            .list_by_author(&author)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_owned(&self, author: UserId, slug: Slug) -> Result<Note, Error> {
        self.find_owned(author, &slug).await
    }
}

#[cfg(test)]
#[path = "notes_service_tests.rs"]
mod tests;
