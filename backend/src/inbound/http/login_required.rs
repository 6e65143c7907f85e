//! Authentication extractors.
//!
//! [`CurrentUser`] guards login-only pages: an anonymous visitor is answered
//! with a redirect to the login page carrying the original path in `next`.
//! [`MaybeUser`] is for public pages that render differently when someone
//! is logged in.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::routes::Route;
use super::session::SessionContext;
use crate::domain::UserId;

/// Bytes left readable in `next`; everything else is percent-encoded.
const NEXT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Login URL that sends the user back to `next` afterwards.
///
/// `/` stays readable; every other reserved character is percent-encoded.
///
/// # Examples
/// ```
/// use noticeboard::inbound::http::login_required::login_url;
///
/// assert_eq!(login_url("/notes/add/"), "/auth/login/?next=/notes/add/");
/// assert_eq!(login_url("/a/?b=c"), "/auth/login/?next=/a/%3Fb%3Dc");
/// ```
#[must_use]
pub fn login_url(next: &str) -> String {
    format!(
        "{}?next={}",
        Route::Login.path(),
        utf8_percent_encode(next, NEXT_ESCAPE)
    )
}

/// Redirect answered to anonymous visitors of login-only pages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("login required to access {next}")]
pub struct LoginRequired {
    next: String,
}

impl LoginRequired {
    /// Redirect back to the path and query of `req`.
    #[must_use]
    pub fn for_request(req: &HttpRequest) -> Self {
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        Self { next }
    }

    /// Where the visitor is sent.
    #[must_use]
    pub fn location(&self) -> String {
        login_url(&self.next)
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location()))
            .finish()
    }
}

/// The logged-in user. Extraction fails with [`LoginRequired`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(UserId);

impl CurrentUser {
    /// Identifier of the logged-in user.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let redirect = LoginRequired::for_request(req);
        Box::pin(async move {
            match session.await?.user_id()? {
                Some(id) => Ok(Self(id)),
                None => {
                    debug!(next = %redirect.next, "anonymous visitor sent to login");
                    Err(redirect.into())
                }
            }
        })
    }
}

/// The logged-in user, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeUser(Option<UserId>);

impl MaybeUser {
    /// Identifier of the logged-in user, if any.
    #[must_use]
    pub fn id(&self) -> Option<UserId> {
        self.0
    }

    /// Whether somebody is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move { Ok(Self(session.await?.user_id()?)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use rstest::rstest;

    #[rstest]
    #[case("/notes/add/", "/auth/login/?next=/notes/add/")]
    #[case("/notes/note/slug/", "/auth/login/?next=/notes/note/slug/")]
    #[case("/news/?page=2&x=1", "/auth/login/?next=/news/%3Fpage%3D2%26x%3D1")]
    #[case("/notes/list/?q=a*b", "/auth/login/?next=/notes/list/%3Fq%3Da%2Ab")]
    #[case("/notes/list/?q=a b", "/auth/login/?next=/notes/list/%3Fq%3Da%20b")]
    #[case("/notes/note/my_note-1.~/", "/auth/login/?next=/notes/note/my_note-1.~/")]
    fn login_url_keeps_slashes_readable(#[case] next: &str, #[case] expected: &str) {
        assert_eq!(login_url(next), expected);
    }

    #[actix_web::test]
    async fn anonymous_visitors_are_redirected_with_next() {
        let app = actix_test::init_service(
            App::new().wrap(test_session_middleware()).route(
                "/private/",
                web::get().to(|user: CurrentUser| async move {
                    HttpResponse::Ok().body(user.id().to_string())
                }),
            ),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/private/?tab=1").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/auth/login/?next=/private/%3Ftab%3D1")
        );
    }

    #[actix_web::test]
    async fn logged_in_users_pass_through() {
        let id = UserId::random();
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(move |session: SessionContext| async move {
                        session.persist_user(&id)?;
                        Ok::<_, crate::domain::Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/private/",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.id().to_string())
                    }),
                )
                .route(
                    "/public/",
                    web::get().to(|user: MaybeUser| async move {
                        HttpResponse::Ok().body(user.is_authenticated().to_string())
                    }),
                ),
        )
        .await;

        let anonymous =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/public/").to_request())
                .await;
        assert_eq!(actix_test::read_body(anonymous).await, "false");

        let login =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&login).expect("session cookie");

        let private = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/private/")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(private.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(private).await, id.to_string());

        let public = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/public/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(actix_test::read_body(public).await, "true");
    }
}
