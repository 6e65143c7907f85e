//! Test utilities for the noticeboard crate.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration suites under `tests/`. [`TestWorld`] wires the real domain
//! services over the in-memory store with a controllable clock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::Trace;
use crate::domain::ports::{
    AddCommentRequest, CommentRepository, CommentsCommand, CreateNoteRequest, NoteRepository,
    NotesCommand, SignupService,
};
use crate::domain::{
    AccountService, Comment, CommentInput, NewNews, NewNote, News, NewsId, NewsService,
    NewsSettings, Note, NoteInput, NotesService, SignupRequest, User, UserId,
};
use crate::inbound::http::configure_routes;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use crate::inbound::http::state::HttpState;
use crate::outbound::credentials::Argon2CredentialHasher;
use crate::outbound::memory::InMemoryStore;

/// Password used by [`TestWorld::create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `seconds`.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    /// Jump to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed start time for every [`TestWorld`].
pub fn epoch() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0) {
        chrono::LocalResult::Single(now) => now,
        _ => panic!("fixed test epoch must be unambiguous"),
    }
}

/// Calendar date helper for seeding news.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

type Notes = NotesService<InMemoryStore>;
type NewsFeed = NewsService<InMemoryStore, InMemoryStore>;
type Accounts = AccountService<InMemoryStore, Argon2CredentialHasher>;

/// Real services over one shared in-memory store.
pub struct TestWorld {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MutableClock>,
    pub notes: Arc<Notes>,
    pub news: Arc<NewsFeed>,
    pub accounts: Arc<Accounts>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// World with default news settings.
    pub fn new() -> Self {
        Self::with_news_settings(NewsSettings::default())
    }

    /// World with custom home page size and moderation.
    pub fn with_news_settings(settings: NewsSettings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(MutableClock::new(epoch()));
        let notes = Arc::new(NotesService::new(Arc::clone(&store)));
        let news = Arc::new(NewsService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            clock.clone(),
            settings,
        ));
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&store),
            Arc::new(Argon2CredentialHasher::fast_insecure()),
        ));
        Self {
            store,
            clock,
            notes,
            news,
            accounts,
        }
    }

    /// Handler state backed by this world's services.
    pub fn http_state(&self) -> HttpState {
        HttpState::from_services(
            Arc::clone(&self.notes),
            Arc::clone(&self.news),
            Arc::clone(&self.accounts),
        )
    }

    /// The full application as served, with an insecure test session.
    ///
    /// The returned app owns its state, so it may outlive `self`.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let health = HealthState::new();
        health.mark_ready();
        App::new()
            .app_data(web::Data::new(self.http_state()))
            .app_data(web::Data::new(health))
            .wrap(SessionSettings::insecure_for_tests().middleware())
            .wrap(Trace)
            .configure(configure_routes)
    }

    /// Register `username` with [`TEST_PASSWORD`].
    pub async fn create_user(&self, username: &str) -> User {
        let request = SignupRequest::validate(username, TEST_PASSWORD, TEST_PASSWORD)
            .unwrap_or_else(|errors| panic!("invalid test signup {username}: {errors:?}"));
        self.accounts
            .signup(&request)
            .await
            .unwrap_or_else(|err| panic!("signup {username} failed: {err}"))
    }

    /// Create a note through the command port, so slugs are validated.
    pub async fn create_note(&self, author: UserId, title: &str, text: &str, slug: &str) -> Note {
        self.notes
            .create(CreateNoteRequest {
                author,
                input: NoteInput {
                    title: title.to_owned(),
                    text: text.to_owned(),
                    slug: slug.to_owned(),
                },
            })
            .await
            .unwrap_or_else(|err| panic!("create note {title:?} failed: {err}"))
    }

    /// Bulk-insert `count` notes titled `Note 0..count` for `author`.
    pub async fn seed_notes(&self, author: UserId, count: usize) -> usize {
        let notes = (0..count)
            .map(|index| {
                NewNote::with_derived_slug(
                    format!("Note {index} of {author}"),
                    "Text",
                    None,
                    author,
                )
                .unwrap_or_else(|| panic!("note {index} has a derivable slug"))
            })
            .collect();
        self.notes
            .bulk_create(notes)
            .await
            .unwrap_or_else(|err| panic!("seeding notes failed: {err}"))
    }

    /// Publish a news item, dated today unless `date` is given.
    pub async fn publish_news(&self, title: &str, date: Option<NaiveDate>) -> News {
        self.news
            .publish(NewNews {
                title: title.to_owned(),
                text: "Просто текст.".to_owned(),
                date,
            })
            .await
            .unwrap_or_else(|err| panic!("publish {title:?} failed: {err}"))
    }

    /// Publish one item per day counting back from `start`.
    pub async fn seed_news(&self, count: usize, start: NaiveDate) -> usize {
        let items = (0..count)
            .map(|index| NewNews {
                title: format!("Новость {index}"),
                text: "Просто текст.".to_owned(),
                date: start.checked_sub_days(chrono::Days::new(index as u64)),
            })
            .collect();
        self.news
            .publish_many(items)
            .await
            .unwrap_or_else(|err| panic!("seeding news failed: {err}"))
    }

    /// Number of stored notes across every author.
    pub async fn note_count(&self) -> usize {
        NoteRepository::count(self.store.as_ref())
            .await
            .unwrap_or_else(|err| panic!("counting notes failed: {err}"))
    }

    /// Number of stored comments across every news item.
    pub async fn comment_count(&self) -> usize {
        CommentRepository::count(self.store.as_ref())
            .await
            .unwrap_or_else(|err| panic!("counting comments failed: {err}"))
    }

    /// Add a comment, then move the clock one second forward.
    pub async fn add_comment(&self, news: NewsId, author: UserId, text: &str) -> Comment {
        let comment = self
            .news
            .add(AddCommentRequest {
                news,
                author,
                input: CommentInput {
                    text: text.to_owned(),
                },
            })
            .await
            .unwrap_or_else(|err| panic!("add comment failed: {err}"));
        self.clock.advance_seconds(1);
        comment
    }
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Log in through the real form and return the session cookie.
pub async fn login<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/auth/login/")
        .set_form([("username", username), ("password", password)])
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(
        response.status(),
        StatusCode::FOUND,
        "login as {username} should redirect"
    );
    session_cookie(&response).unwrap_or_else(|| panic!("login as {username} sets a cookie"))
}

/// `Location` header of a redirect response.
pub fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| panic!("response {} has no Location", response.status()))
}
