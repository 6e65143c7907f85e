//! Form-bound validation errors.
//!
//! Validation failures are collected per field so inbound adapters can
//! re-render the submitted form next to the messages. Errors that do not
//! belong to a single field live under [`NON_FIELD_ERRORS`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key used for errors that concern the form as a whole.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Message used when a required field is blank.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Validation messages keyed by field name.
///
/// # Examples
/// ```
/// use noticeboard::domain::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("text", "This field is required.");
/// assert_eq!(errors.get("text"), ["This field is required."]);
/// assert!(errors.get("title").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Error set holding a single message.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `field` has at least one message.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// `true` when no messages were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

/// Return the trimmed value or record a "required" error.
pub(crate) fn required<'a>(
    errors: &mut FieldErrors,
    field: &str,
    value: &'a str,
) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
        None
    } else {
        Some(trimmed)
    }
}

/// Record a length error when `value` exceeds `max` characters.
pub(crate) fn check_max_chars(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {length})."),
        );
    }
}
