//! Bound form contexts.
//!
//! A page showing a form carries `{ "values": ..., "errors": ... }`. After a
//! rejected submission the values are echoed back next to the messages and
//! the page is answered with `400 Bad Request`.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::{Error, FieldErrors};

/// Form values with their validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormContext<T> {
    pub values: T,
    pub errors: FieldErrors,
}

impl<T> FormContext<T> {
    /// Form without errors.
    pub fn unbound(values: T) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
        }
    }

    /// Form re-rendered after a rejected submission.
    pub fn bound(values: T, errors: FieldErrors) -> Self {
        Self { values, errors }
    }
}

/// Split a service failure into form errors, passing anything else through.
///
/// # Errors
/// Returns `error` unchanged when it carries no field errors.
pub fn form_errors(error: Error) -> Result<FieldErrors, Error> {
    match error.field_errors() {
        Some(errors) => Ok(errors.clone()),
        None => Err(error),
    }
}

/// Page re-rendered with a bound form.
pub fn invalid_form<P: Serialize>(page: &P) -> HttpResponse {
    HttpResponse::BadRequest().json(page)
}
