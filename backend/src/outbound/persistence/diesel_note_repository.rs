//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{NewNote, Note, NoteId, Slug, UserId};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewNoteRow, NoteChanges, NoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

const SLUG_CONSTRAINT: &str = "notes_slug_key";

/// Diesel-backed implementation of the [`NoteRepository`] port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NoteRepositoryError {
    map_basic_pool_error(error, NoteRepositoryError::connection)
}

/// Map Diesel errors, translating slug constraint hits into `DuplicateSlug`.
fn map_write_error(error: diesel::result::Error, slug: &str) -> NoteRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique(name))
            if name.is_none_or(|name| name == SLUG_CONSTRAINT) =>
        {
            NoteRepositoryError::duplicate_slug(slug)
        }
        _ => map_diesel_error(error),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> NoteRepositoryError {
    map_basic_diesel_error(
        error,
        NoteRepositoryError::query,
        NoteRepositoryError::connection,
    )
}

fn row_to_note(row: NoteRow) -> Result<Note, NoteRepositoryError> {
    let slug = Slug::new(row.slug)
        .map_err(|err| NoteRepositoryError::query(format!("stored slug invalid: {err}")))?;
    Ok(Note {
        id: NoteId::new(row.id),
        title: row.title,
        text: row.text,
        slug,
        author: UserId::from(row.author_id),
    })
}

fn new_row(note: &NewNote) -> NewNoteRow<'_> {
    NewNoteRow {
        title: &note.title,
        text: &note.text,
        slug: note.slug.as_str(),
        author_id: *note.author.as_uuid(),
    }
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(notes::table)
            .values(&new_row(note))
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, note.slug.as_str()))?;
        row_to_note(row)
    }

    async fn bulk_insert(&self, notes_to_insert: &[NewNote]) -> Result<usize, NoteRepositoryError> {
        if notes_to_insert.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewNoteRow<'_>> = notes_to_insert.iter().map(new_row).collect();
        diesel::insert_into(notes::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, "<bulk>"))
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = notes::table
            .filter(notes::slug.eq(slug.as_str()))
            .select(NoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_note).transpose()
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = notes::table
            .filter(notes::author_id.eq(author.as_uuid()))
            .order(notes::id.asc())
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_note).collect()
    }

    async fn update(&self, note: &Note) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = NoteChanges {
            title: &note.title,
            text: &note.text,
            slug: note.slug.as_str(),
        };
        let updated = diesel::update(notes::table.find(note.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, note.slug.as_str()))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(notes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<usize, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = notes::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        usize::try_from(total)
            .map_err(|_| NoteRepositoryError::query(format!("row count {total} out of range")))
    }
}
