//! Note slugs and the transliterating slugify pipeline.
//!
//! Slugs derived from titles follow the classic Russian-to-Latin
//! transliteration table so Cyrillic titles produce readable ASCII slugs.
//! Explicit slugs are validated against the `[-a-zA-Z0-9_]+` alphabet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum stored slug length in characters.
pub const SLUG_MAX_LEN: usize = 100;

/// Message shown when an explicit slug contains disallowed characters.
pub const INVALID_SLUG_MESSAGE: &str =
    "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.";

/// Validation errors raised by [`Slug::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    #[error("slug must not be empty")]
    Empty,
    #[error("slug must be at most {max} characters")]
    TooLong { max: usize },
    #[error("{}", INVALID_SLUG_MESSAGE)]
    InvalidCharacters,
}

/// URL-safe note identifier.
///
/// ## Invariants
/// - Non-empty, at most [`SLUG_MAX_LEN`] characters.
/// - Only ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate an explicit slug.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if value.chars().count() > SLUG_MAX_LEN {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX_LEN });
        }
        if !value.chars().all(is_slug_char) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Derive a slug from `title`, truncated to [`SLUG_MAX_LEN`].
    ///
    /// Returns `None` when nothing survives transliteration (for example a
    /// title made only of punctuation).
    ///
    /// # Examples
    /// ```
    /// use noticeboard::domain::Slug;
    ///
    /// let slug = Slug::from_title("Ответ голодным животным").expect("slug");
    /// assert_eq!(slug.as_str(), "otvet-golodnyim-zhivotnyim");
    /// ```
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        let derived: String = slugify(title).chars().take(SLUG_MAX_LEN).collect();
        if derived.is_empty() {
            None
        } else {
            Some(Self(derived))
        }
    }

    /// Borrow the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Transliterate and slugify `input` without truncation.
///
/// The pipeline lowercases the text, spells out ampersands, collapses runs of
/// whitespace and hyphens into one hyphen, drops characters the
/// transliteration table does not know, transliterates, and finally removes
/// the punctuation the table produced.
#[must_use]
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase().replace("&amp;", "&").replace('&', " and ");
    let collapsed = collapse_separators(&lowered);
    let mut transliterated = String::with_capacity(collapsed.len());
    for ch in collapsed.chars() {
        if let Some(latin) = transliterate(ch) {
            transliterated.push_str(latin);
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            transliterated.push(ch);
        }
    }
    transliterated
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_')
        .collect::<String>()
        .to_lowercase()
}

fn collapse_separators(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for ch in input.chars() {
        if ch == '-' || ch.is_whitespace() {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Latin replacement for a lowercase character, if the table knows it.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        '\'' | '‘' | '’' | 'ь' => "'",
        '"' | '«' | '»' | '“' | '”' => "\"",
        '–' | '—' | '‒' | '−' => "-",
        '…' => "...",
        '№' => "#",
        'щ' => "sch",
        'ё' => "yo",
        'ж' => "zh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'ы' => "yi",
        'ю' => "yu",
        'я' => "ya",
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'э' => "e",
        'ъ' => "`",
        'є' => "ye",
        'ґ' => "g",
        'і' => "i",
        'ї' => "yi",
        _ => return None,
    };
    Some(latin)
}
