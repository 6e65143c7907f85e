//! In-memory implementation of every repository port.
//!
//! Used when no database URL is configured and by the integration tests.
//! A single mutex serialises access and the store enforces the same
//! uniqueness and foreign-key rules as the PostgreSQL schema.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, NewUser, NewsRecord, NewsRepository,
    NewsRepositoryError, NoteRepository, NoteRepositoryError, StoredCredentials,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Comment, CommentId, NewComment, NewNote, News, NewsId, Note, NoteId, Slug, User, UserId,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<Uuid, StoredCredentials>,
    notes: BTreeMap<i64, Note>,
    news: BTreeMap<i64, News>,
    comments: BTreeMap<i64, Comment>,
    last_note_id: i64,
    last_news_id: i64,
    last_comment_id: i64,
}

impl MemoryState {
    fn slug_taken(&self, slug: &Slug, except: Option<NoteId>) -> bool {
        self.notes
            .values()
            .any(|note| &note.slug == slug && Some(note.id) != except)
    }

    fn push_note(&mut self, note: &NewNote) -> Note {
        self.last_note_id += 1;
        let stored = Note {
            id: NoteId::new(self.last_note_id),
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            author: note.author,
        };
        self.notes.insert(self.last_note_id, stored.clone());
        stored
    }

    fn push_news(&mut self, record: &NewsRecord) -> News {
        self.last_news_id += 1;
        let stored = News {
            id: NewsId::new(self.last_news_id),
            title: record.title.clone(),
            text: record.text.clone(),
            date: record.date,
        };
        self.news.insert(self.last_news_id, stored.clone());
        stored
    }
}

/// Mutex-guarded store shared by all repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // Mutations never leave partial state, so a poisoned lock is reusable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|stored| stored.user.username() == &user.username)
        {
            return Err(UserPersistenceError::username_taken(user.username.as_str()));
        }
        let created = User::new(user.id, user.username.clone());
        state.users.insert(
            *user.id.as_uuid(),
            StoredCredentials {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .get(id.as_uuid())
            .map(|stored| stored.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|stored| stored.user.username().as_str() == username)
            .cloned())
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn insert(&self, note: &NewNote) -> Result<Note, NoteRepositoryError> {
        let mut state = self.lock();
        if state.slug_taken(&note.slug, None) {
            return Err(NoteRepositoryError::duplicate_slug(note.slug.as_str()));
        }
        Ok(state.push_note(note))
    }

    async fn bulk_insert(&self, notes: &[NewNote]) -> Result<usize, NoteRepositoryError> {
        let mut state = self.lock();
        for (index, note) in notes.iter().enumerate() {
            let repeated = notes
                .iter()
                .take(index)
                .any(|other| other.slug == note.slug);
            if repeated || state.slug_taken(&note.slug, None) {
                return Err(NoteRepositoryError::duplicate_slug(note.slug.as_str()));
            }
        }
        for note in notes {
            state.push_note(note);
        }
        Ok(notes.len())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Note>, NoteRepositoryError> {
        Ok(self
            .lock()
            .notes
            .values()
            .find(|note| &note.slug == slug)
            .cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        Ok(self
            .lock()
            .notes
            .values()
            .filter(|note| &note.author == author)
            .cloned()
            .collect())
    }

    async fn update(&self, note: &Note) -> Result<bool, NoteRepositoryError> {
        let mut state = self.lock();
        if state.slug_taken(&note.slug, Some(note.id)) {
            return Err(NoteRepositoryError::duplicate_slug(note.slug.as_str()));
        }
        let Some(stored) = state.notes.get_mut(&note.id.get()) else {
            return Ok(false);
        };
        stored.title.clone_from(&note.title);
        stored.text.clone_from(&note.text);
        stored.slug = note.slug.clone();
        Ok(true)
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        Ok(self.lock().notes.remove(&id.get()).is_some())
    }

    async fn count(&self) -> Result<usize, NoteRepositoryError> {
        Ok(self.lock().notes.len())
    }
}

#[async_trait]
impl NewsRepository for InMemoryStore {
    async fn insert(&self, record: &NewsRecord) -> Result<News, NewsRepositoryError> {
        Ok(self.lock().push_news(record))
    }

    async fn bulk_insert(&self, records: &[NewsRecord]) -> Result<usize, NewsRepositoryError> {
        let mut state = self.lock();
        for record in records {
            state.push_news(record);
        }
        Ok(records.len())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<News>, NewsRepositoryError> {
        let state = self.lock();
        let mut listed: Vec<News> = state.news.values().cloned().collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        listed.truncate(limit);
        Ok(listed)
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        Ok(self.lock().news.get(&id.get()).cloned())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut state = self.lock();
        if !state.news.contains_key(&comment.news.get()) {
            return Err(CommentRepositoryError::missing_news(comment.news.get()));
        }
        state.last_comment_id += 1;
        let stored = Comment {
            id: CommentId::new(state.last_comment_id),
            news: comment.news,
            author: comment.author,
            text: comment.text.clone(),
            created: comment.created,
        };
        let id = state.last_comment_id;
        state.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.lock();
        let mut listed: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.news == news)
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self.lock().comments.get(&id.get()).cloned())
    }

    async fn update_text(&self, id: CommentId, text: &str) -> Result<bool, CommentRepositoryError> {
        let mut state = self.lock();
        let Some(stored) = state.comments.get_mut(&id.get()) else {
            return Ok(false);
        };
        text.clone_into(&mut stored.text);
        Ok(true)
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        Ok(self.lock().comments.remove(&id.get()).is_some())
    }

    async fn count(&self) -> Result<usize, CommentRepositoryError> {
        Ok(self.lock().comments.len())
    }
}

#[cfg(test)]
mod tests;
