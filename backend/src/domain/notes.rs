//! Note entities and form validation.
//!
//! Notes are private to their author and addressed by a unique [`Slug`].
//! Field validation happens here; slug uniqueness needs the repository and
//! is checked by [`crate::domain::NotesService`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::slug::{SLUG_MAX_LEN, Slug, SlugValidationError};
use super::user::UserId;
use super::validation::{FieldErrors, check_max_chars, required};

/// Maximum note title length in characters.
pub const NOTE_TITLE_MAX: usize = 100;

/// Suffix appended to a duplicate slug in the form error.
pub const DUPLICATE_SLUG_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Form error shown when `slug` is already taken.
#[must_use]
pub fn duplicate_slug_message(slug: &str) -> String {
    format!("{slug}{DUPLICATE_SLUG_WARNING}")
}

/// Database identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
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

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    pub slug: Slug,
    pub author: UserId,
}

/// Note ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: Slug,
    pub author: UserId,
}

impl NewNote {
    /// Build a note, deriving the slug from the title when none is given.
    ///
    /// Returns `None` when no slug is given and none can be derived.
    #[must_use]
    pub fn with_derived_slug(
        title: impl Into<String>,
        text: impl Into<String>,
        slug: Option<Slug>,
        author: UserId,
    ) -> Option<Self> {
        let title = title.into();
        let slug = match slug {
            Some(slug) => slug,
            None => Slug::from_title(&title)?,
        };
        Some(Self {
            title,
            text: text.into(),
            slug,
            author,
        })
    }
}

/// Raw note form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteInput {
    pub title: String,
    pub text: String,
    pub slug: String,
}

/// Note form after field validation.
///
/// `slug` is always present: either the explicit value or the one derived
/// from the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: Slug,
}

impl NoteInput {
    /// Validate every field except slug uniqueness.
    pub fn validate(&self) -> Result<NoteDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = required(&mut errors, "title", &self.title);
        if let Some(title) = title {
            check_max_chars(&mut errors, "title", title, NOTE_TITLE_MAX);
        }
        let text = required(&mut errors, "text", &self.text);

        let explicit = self.slug.trim();
        let slug = if explicit.is_empty() {
            title.and_then(|title| {
                let derived = Slug::from_title(title);
                if derived.is_none() {
                    errors.add(
                        "slug",
                        "Could not derive a slug from the title; please provide one.",
                    );
                }
                derived
            })
        } else {
            match Slug::new(explicit) {
                Ok(slug) => Some(slug),
                Err(SlugValidationError::TooLong { .. }) => {
                    check_max_chars(&mut errors, "slug", explicit, SLUG_MAX_LEN);
                    None
                }
                Err(err) => {
                    errors.add("slug", err.to_string());
                    None
                }
            }
        };

        match (title, text, slug) {
            (Some(title), Some(text), Some(slug)) if errors.is_empty() => Ok(NoteDraft {
                title: title.to_owned(),
                text: text.to_owned(),
                slug,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Note> for NoteInput {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.to_string(),
        }
    }
}
