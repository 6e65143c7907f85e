//! Request helpers shared by the page suites.
//!
//! Each suite drives the full application built by
//! [`TestWorld::app`](noticeboard::test_support::TestWorld::app) through
//! `actix_web::test`, so sessions, redirects, and routing behave as served.

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use noticeboard::test_support::TestWorld;
use rstest::fixture;
use serde_json::Value;

#[fixture]
pub(crate) fn world() -> TestWorld {
    TestWorld::new()
}

/// `GET uri`, optionally as the owner of `cookie`.
pub(crate) async fn get<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    test::call_service(app, request.to_request()).await
}

/// `POST uri` with an urlencoded body.
pub(crate) async fn post_form<S>(
    app: &S,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    form: &[(&str, &str)],
) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::post().uri(uri).set_form(form);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    test::call_service(app, request.to_request()).await
}

/// Decode a JSON page context.
pub(crate) async fn json(response: ServiceResponse) -> Value {
    test::read_body_json(response).await
}
