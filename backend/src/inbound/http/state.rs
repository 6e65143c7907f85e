//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentsCommand, LoginService, NewsQuery, NotesCommand, NotesQuery, SignupService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub news: Arc<dyn NewsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
}

impl HttpState {
    /// Build state from one service per application.
    ///
    /// Each service implements both sides (command and query) of its ports.
    pub fn from_services<N, W, A>(notes: Arc<N>, news: Arc<W>, accounts: Arc<A>) -> Self
    where
        N: NotesCommand + NotesQuery + 'static,
        W: NewsQuery + CommentsCommand + 'static,
        A: LoginService + SignupService + 'static,
    {
        Self {
            notes: notes.clone(),
            notes_query: notes,
            news: news.clone(),
            comments: news,
            login: accounts.clone(),
            signup: accounts,
        }
    }
}
