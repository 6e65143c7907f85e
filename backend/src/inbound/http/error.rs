//! Error pages.
//!
//! A domain failure that escapes a handler is answered with a small JSON
//! page: `{ code, message, traceId?, form? }`. Validation failures that no
//! handler re-rendered still reach the client as an unbound form carrying
//! the field messages. Internal failures are logged and replaced by a
//! generic message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::forms::FormContext;
pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body of an error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorPage<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<FormContext<Map<String, Value>>>,
}

impl<'a> ErrorPage<'a> {
    fn for_error(error: &'a Error) -> Self {
        let message = match error.code() {
            ErrorCode::InternalError => {
                error!(message = error.message(), "internal error returned to client");
                INTERNAL_MESSAGE
            }
            _ => error.message(),
        };
        let form = error.field_errors().map(|errors| {
            debug!(fields = ?errors, "validation failure rendered without its page");
            FormContext::bound(Map::new(), errors.clone())
        });
        Self {
            code: error.code(),
            message,
            trace_id: error.trace_id(),
            form,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorPage::for_error(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_MESSAGE)
    }
}
