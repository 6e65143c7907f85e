//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use super::health::HealthState;
use super::session::SessionContext;
use super::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use super::state::HttpState;
use crate::domain::{Error, UserId};

/// Path of the shortcut login route mounted by [`test_app`].
pub const TEST_LOGIN_PATH: &str = "/__test/login";

/// Session middleware with a fresh key and the `Secure` flag disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings::insecure_for_tests().middleware()
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

async fn test_login(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = UserId::new(path.as_str()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Full page routing over `state`, plus a shortcut login route.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(test_session_middleware())
        .route(
            &format!("{TEST_LOGIN_PATH}/{{id}}"),
            web::get().to(test_login),
        )
        .configure(super::configure_routes)
}

/// Session cookie for `user`, obtained through the shortcut login route.
pub async fn login_cookie<S>(app: &S, user: UserId) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::get()
        .uri(&format!("{TEST_LOGIN_PATH}/{user}"))
        .to_request();
    let response = test::call_service(app, request).await;
    session_cookie(&response).expect("test login sets a session cookie")
}
