//! Domain primitives, services, and ports.
//!
//! Purpose: define the notes and news entities, validate form input, and
//! enforce the ownership-gated mutation contract independently of HTTP or
//! storage. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - FieldErrors (alias to `validation::FieldErrors`): form-bound messages.
//! - Note / News / Comment: application entities.
//! - NotesService / NewsService / AccountService: use-case implementations.

pub mod accounts_service;
pub mod auth;
pub mod error;
pub mod moderation;
pub mod news;
pub mod news_service;
pub mod notes;
pub mod notes_service;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::accounts_service::{AccountService, USERNAME_TAKEN_MESSAGE};
pub use self::auth::{
    INVALID_LOGIN_MESSAGE, LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN,
    SignupRequest,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::moderation::{CommentModeration, DEFAULT_BANNED_WORDS, DEFAULT_WARNING};
pub use self::news::{
    Comment, CommentId, CommentInput, NEWS_COUNT_ON_HOME_PAGE, NEWS_TITLE_MAX, NewComment,
    NewNews, News, NewsDetail, NewsId,
};
pub use self::news_service::{NewsService, NewsSettings};
pub use self::notes::{
    DUPLICATE_SLUG_WARNING, NOTE_TITLE_MAX, NewNote, Note, NoteDraft, NoteId, NoteInput,
    duplicate_slug_message,
};
pub use self::notes_service::NotesService;
pub use self::slug::{SLUG_MAX_LEN, Slug, SlugValidationError, slugify};
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
pub use self::validation::{FieldErrors, NON_FIELD_ERRORS, REQUIRED_MESSAGE};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use noticeboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
