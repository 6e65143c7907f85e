//! News items and their comments.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::moderation::CommentModeration;
use super::user::UserId;
use super::validation::{FieldErrors, required};

/// Maximum news title length in characters.
pub const NEWS_TITLE_MAX: usize = 50;

/// Default number of news items shown on the home page.
pub const NEWS_COUNT_ON_HOME_PAGE: usize = 10;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Raw identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Database identifier of a news item.
    NewsId
);
numeric_id!(
    /// Database identifier of a comment.
    CommentId
);

/// Published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// News item ready for insertion. A missing date means "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    pub title: String,
    pub text: String,
    pub date: Option<NaiveDate>,
}

/// Comment under a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub news: NewsId,
    pub author: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Comment ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub news: NewsId,
    pub author: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Raw comment form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentInput {
    pub text: String,
}

impl CommentInput {
    /// Validate the text and run it through `moderation`.
    pub fn validate(&self, moderation: &CommentModeration) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        let Some(text) = required(&mut errors, "text", &self.text) else {
            return Err(errors);
        };
        if let Err(warning) = moderation.check(text) {
            return Err(FieldErrors::single("text", warning));
        }
        Ok(text.to_owned())
    }
}

impl From<&Comment> for CommentInput {
    fn from(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
        }
    }
}

/// Everything the news detail page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    pub news: News,
    pub comments: Vec<Comment>,
}
