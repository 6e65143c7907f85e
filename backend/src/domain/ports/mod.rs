//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing) are implemented by outbound
//! adapters; driving ports (commands, queries, login) are implemented by the
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod comments_command;
mod credential_hasher;
mod login_service;
mod news_query;
mod news_repository;
mod note_repository;
mod notes_command;
mod notes_query;
mod user_repository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::{AddCommentRequest, CommentsCommand, EditCommentRequest};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use login_service::{MockLoginService, MockSignupService};
pub use login_service::{LoginService, SignupService};
#[cfg(test)]
pub use news_query::MockNewsQuery;
pub use news_query::NewsQuery;
#[cfg(test)]
pub use news_repository::MockNewsRepository;
pub use news_repository::{NewsRecord, NewsRepository, NewsRepositoryError};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use notes_command::MockNotesCommand;
pub use notes_command::{CreateNoteRequest, EditNoteRequest, NotesCommand};
#[cfg(test)]
pub use notes_query::MockNotesQuery;
pub use notes_query::NotesQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
