//! Account pages: login, logout, signup.
//!
//! ```text
//! GET|POST /auth/login/?next=/notes/add/
//! GET|POST /auth/logout/
//! GET|POST /auth/signup/
//! ```
//!
//! Passwords are never echoed back in a bound form.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ApiResult;
use super::forms::{FormContext, form_errors, invalid_form};
use super::routes::{Route, redirect};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{
    ErrorCode, FieldErrors, INVALID_LOGIN_MESSAGE, LoginCredentials, NON_FIELD_ERRORS,
    SignupRequest,
};

/// `?next=` query parameter of the login page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Submitted login form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

/// Login values shown back to the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginValues {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Submitted signup form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// Signup values shown back to the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupValues {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct FormPage<T> {
    pub form: FormContext<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedOutPage {
    pub logged_out: bool,
}

/// `next` when it points inside this site, the news feed otherwise.
///
/// # Examples
/// ```
/// use noticeboard::inbound::http::users::safe_next;
///
/// assert_eq!(safe_next(Some("/notes/add/")), "/notes/add/");
/// assert_eq!(safe_next(Some("//evil.example/")), "/news/");
/// assert_eq!(safe_next(None), "/news/");
/// ```
#[must_use]
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_owned()
        }
        _ => Route::NewsHome.path().to_owned(),
    }
}

/// `GET /auth/login/`.
pub async fn login_page(query: web::Query<NextQuery>) -> web::Json<FormPage<LoginValues>> {
    let values = LoginValues {
        username: String::new(),
        next: query.into_inner().next,
    };
    web::Json(FormPage {
        form: FormContext::unbound(values),
    })
}

/// `POST /auth/login/`.
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm {
        username,
        password,
        next,
    } = form.into_inner();
    let next = next.filter(|n| !n.is_empty()).or(query.into_inner().next);
    let values = LoginValues {
        username: username.clone(),
        next: next.clone(),
    };
    let rejected = |errors: FieldErrors| {
        invalid_form(&FormPage {
            form: FormContext::bound(values.clone(), errors),
        })
    };

    let credentials = match LoginCredentials::validate(&username, &password) {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(rejected(errors)),
    };
    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(&user_id)?;
            info!(%user_id, "user logged in");
            Ok(redirect(&safe_next(next.as_deref())))
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => Ok(rejected(
            FieldErrors::single(NON_FIELD_ERRORS, INVALID_LOGIN_MESSAGE),
        )),
        Err(error) => Err(error),
    }
}

/// `GET|POST /auth/logout/`.
pub async fn logout(session: SessionContext) -> web::Json<LoggedOutPage> {
    session.clear();
    web::Json(LoggedOutPage { logged_out: true })
}

/// `GET /auth/signup/`.
pub async fn signup_page() -> web::Json<FormPage<SignupValues>> {
    web::Json(FormPage {
        form: FormContext::unbound(SignupValues::default()),
    })
}

/// `POST /auth/signup/`.
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let SignupForm {
        username,
        password1,
        password2,
    } = form.into_inner();
    let values = SignupValues {
        username: username.clone(),
    };
    let rejected = |errors: FieldErrors| {
        invalid_form(&FormPage {
            form: FormContext::bound(values.clone(), errors),
        })
    };

    let request = match SignupRequest::validate(&username, &password1, &password2) {
        Ok(request) => request,
        Err(errors) => return Ok(rejected(errors)),
    };
    match state.signup.signup(&request).await {
        Ok(_) => Ok(redirect(Route::Login.path())),
        Err(error) => Ok(rejected(form_errors(error)?)),
    }
}

#[cfg(test)]
mod tests;
