//! Tests for the account pages.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockCommentsCommand, MockLoginService, MockNewsQuery, MockNotesCommand, MockNotesQuery,
    MockSignupService,
};
use crate::domain::{Error, REQUIRED_MESSAGE, USERNAME_TAKEN_MESSAGE, User, UserId};
use crate::inbound::http::test_utils::{session_cookie, test_app};

fn state(login: MockLoginService, signup: MockSignupService) -> HttpState {
    HttpState {
        notes: Arc::new(MockNotesCommand::new()),
        notes_query: Arc::new(MockNotesQuery::new()),
        news: Arc::new(MockNewsQuery::new()),
        comments: Arc::new(MockCommentsCommand::new()),
        login: Arc::new(login),
        signup: Arc::new(signup),
    }
}

fn location(res: &actix_web::dev::ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

#[rstest]
#[case(Some("/notes/add/"), "/notes/add/")]
#[case(Some("/news/1/?x=1"), "/news/1/?x=1")]
#[case(Some("https://evil.example/"), "/news/")]
#[case(Some("//evil.example/"), "/news/")]
#[case(Some("/\\evil.example/"), "/news/")]
#[case(None, "/news/")]
fn next_only_follows_local_paths(#[case] next: Option<&str>, #[case] expected: &str) {
    assert_eq!(safe_next(next), expected);
}

#[rstest]
#[actix_web::test]
async fn login_page_echoes_next() {
    let app = actix_test::init_service(test_app(state(
        MockLoginService::new(),
        MockSignupService::new(),
    )))
    .await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/auth/login/?next=/notes/list/")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"form": {"values": {"username": "", "next": "/notes/list/"}, "errors": {}}})
    );
}

#[rstest]
#[actix_web::test]
async fn successful_login_sets_session_and_follows_next() {
    let user = UserId::random();
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .withf(|creds| creds.username() == "reader" && creds.password() == "secret-pass")
        .times(1)
        .return_once(move |_| Ok(user));
    let app = actix_test::init_service(test_app(state(login, MockSignupService::new()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/auth/login/?next=/notes/add/")
            .set_form([("username", "reader"), ("password", "secret-pass")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/notes/add/"));
    assert!(session_cookie(&res).is_some());
}

#[rstest]
#[actix_web::test]
async fn wrong_credentials_are_a_non_field_error() {
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .times(1)
        .return_once(|_| Err(Error::unauthorized("invalid credentials")));
    let app = actix_test::init_service(test_app(state(login, MockSignupService::new()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/auth/login/")
            .set_form([("username", "reader"), ("password", "wrong")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["form"]["values"], json!({"username": "reader"}));
    assert_eq!(body["form"]["errors"][NON_FIELD_ERRORS][0], INVALID_LOGIN_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn blank_login_fields_never_reach_the_service() {
    let app = actix_test::init_service(test_app(state(
        MockLoginService::new(),
        MockSignupService::new(),
    )))
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/auth/login/")
            .set_form([("username", " "), ("password", "")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["form"]["errors"]["username"][0], REQUIRED_MESSAGE);
    assert_eq!(body["form"]["errors"]["password"][0], REQUIRED_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn signup_redirects_to_login() {
    let mut signup = MockSignupService::new();
    signup.expect_signup().times(1).return_once(|request| {
        Ok(User::new(UserId::random(), request.username().clone()))
    });
    let app = actix_test::init_service(test_app(state(MockLoginService::new(), signup))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/auth/signup/")
            .set_form([
                ("username", "reader"),
                ("password1", "secret-pass"),
                ("password2", "secret-pass"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/auth/login/"));
}

#[rstest]
#[actix_web::test]
async fn taken_username_is_reported_on_field() {
    let mut signup = MockSignupService::new();
    signup.expect_signup().times(1).return_once(|_| {
        Err(Error::validation(FieldErrors::single(
            "username",
            USERNAME_TAKEN_MESSAGE,
        )))
    });
    let app = actix_test::init_service(test_app(state(MockLoginService::new(), signup))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/auth/signup/")
            .set_form([
                ("username", "reader"),
                ("password1", "secret-pass"),
                ("password2", "secret-pass"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["form"]["values"], json!({"username": "reader"}));
    assert_eq!(body["form"]["errors"]["username"][0], USERNAME_TAKEN_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn logout_purges_session() {
    let app = actix_test::init_service(test_app(state(
        MockLoginService::new(),
        MockSignupService::new(),
    )))
    .await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/auth/logout/").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"loggedOut": true}));
}
