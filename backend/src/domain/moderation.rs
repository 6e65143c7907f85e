//! Banned-word filter applied to comment text.

/// Words rejected in comments by default.
pub const DEFAULT_BANNED_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Warning shown when a comment contains a banned word.
pub const DEFAULT_WARNING: &str = "Не ругайтесь!";

/// Case-insensitive substring filter over a configured word list.
///
/// # Examples
/// ```
/// use noticeboard::domain::CommentModeration;
///
/// let moderation = CommentModeration::default();
/// assert!(moderation.check("Хорошая новость").is_ok());
/// assert_eq!(moderation.check("Ты РЕДИСКА"), Err("Не ругайтесь!"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentModeration {
    banned_words: Vec<String>,
    warning: String,
}

impl CommentModeration {
    /// Build a filter; words are lowercased and blank entries dropped.
    pub fn new<I, S>(banned_words: I, warning: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned_words = banned_words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self {
            banned_words,
            warning: warning.into(),
        }
    }

    /// Configured words, lowercased.
    #[must_use]
    pub fn banned_words(&self) -> &[String] {
        &self.banned_words
    }

    /// Warning returned for rejected text.
    #[must_use]
    pub fn warning(&self) -> &str {
        &self.warning
    }

    /// Reject `text` when it contains any banned word.
    pub fn check(&self, text: &str) -> Result<(), &str> {
        let lowered = text.to_lowercase();
        if self
            .banned_words
            .iter()
            .any(|word| lowered.contains(word.as_str()))
        {
            return Err(&self.warning);
        }
        Ok(())
    }
}

impl Default for CommentModeration {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS, DEFAULT_WARNING)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Какой-то текст, редиска, еще текст")]
    #[case("НЕГОДЯЙ!")]
    #[case("негодяйский поступок")]
    fn rejects_banned_substrings(#[case] text: &str) {
        assert_eq!(CommentModeration::default().check(text), Err(DEFAULT_WARNING));
    }

    #[rstest]
    #[case("Отличная новость")]
    #[case("")]
    fn accepts_clean_text(#[case] text: &str) {
        assert!(CommentModeration::default().check(text).is_ok());
    }

    #[rstest]
    fn custom_lists_are_normalised() {
        let moderation = CommentModeration::new([" Spam ", "", "EGGS"], "no");
        assert_eq!(moderation.banned_words(), ["spam", "eggs"]);
        assert_eq!(moderation.check("some spam here"), Err("no"));
    }
}
