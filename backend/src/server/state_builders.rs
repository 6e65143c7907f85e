//! Builders for HTTP state over the configured repository backend.

use std::sync::Arc;

use mockable::Clock;

use noticeboard::domain::ports::{
    CommentRepository, CredentialHasher, NewsRepository, NoteRepository, UserRepository,
};
use noticeboard::domain::{AccountService, NewsService, NewsSettings, NotesService};
use noticeboard::inbound::http::state::HttpState;
use noticeboard::outbound::credentials::Argon2CredentialHasher;
use noticeboard::outbound::memory::InMemoryStore;
use noticeboard::outbound::persistence::{
    DieselCommentRepository, DieselNewsRepository, DieselNoteRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Repository adapters backing every service.
struct Repositories<U: ?Sized, N: ?Sized, W: ?Sized, C: ?Sized> {
    users: Arc<U>,
    notes: Arc<N>,
    news: Arc<W>,
    comments: Arc<C>,
}

/// Wire the domain services over `repos` and expose them as driving ports.
fn build_state_over<U, N, W, C, H>(
    repos: Repositories<U, N, W, C>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    news: NewsSettings,
) -> HttpState
where
    U: UserRepository + 'static,
    N: NoteRepository + 'static,
    W: NewsRepository + 'static,
    C: CommentRepository + 'static,
    H: CredentialHasher + 'static,
{
    let Repositories {
        users,
        notes,
        news: news_repo,
        comments,
    } = repos;
    HttpState::from_services(
        Arc::new(NotesService::new(notes)),
        Arc::new(NewsService::new(news_repo, comments, clock, news)),
        Arc::new(AccountService::new(users, hasher)),
    )
}

/// Build handler state, using Diesel adapters when a pool is configured and
/// the in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    let hasher = Arc::new(Argon2CredentialHasher::new());
    let news = config.news.clone();
    match &config.db_pool {
        Some(pool) => build_state_over(
            Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                notes: Arc::new(DieselNoteRepository::new(pool.clone())),
                news: Arc::new(DieselNewsRepository::new(pool.clone())),
                comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            },
            hasher,
            clock,
            news,
        ),
        None => {
            let store = Arc::new(InMemoryStore::new());
            build_state_over(
                Repositories {
                    users: Arc::clone(&store),
                    notes: Arc::clone(&store),
                    news: Arc::clone(&store),
                    comments: store,
                },
                hasher,
                clock,
                news,
            )
        }
    }
}
