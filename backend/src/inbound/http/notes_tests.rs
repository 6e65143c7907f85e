//! Handler tests for the notes pages, backed by mocked ports.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::{
    MockCommentsCommand, MockLoginService, MockNewsQuery, MockNotesCommand, MockNotesQuery,
    MockSignupService,
};
use crate::domain::{FieldErrors, NoteId, UserId, duplicate_slug_message};
use crate::inbound::http::test_utils::{login_cookie, test_app};

fn state(notes: MockNotesCommand, notes_query: MockNotesQuery) -> HttpState {
    HttpState {
        notes: Arc::new(notes),
        notes_query: Arc::new(notes_query),
        news: Arc::new(MockNewsQuery::new()),
        comments: Arc::new(MockCommentsCommand::new()),
        login: Arc::new(MockLoginService::new()),
        signup: Arc::new(MockSignupService::new()),
    }
}

fn note(author: UserId, slug: &str) -> Note {
    Note {
        id: NoteId::new(1),
        title: "Заголовок".to_owned(),
        text: "Текст".to_owned(),
        slug: Slug::new(slug).expect("valid slug"),
        author,
    }
}

#[rstest]
#[actix_web::test]
async fn add_redirects_to_success_page() {
    let author = UserId::random();
    let mut notes = MockNotesCommand::new();
    notes
        .expect_create()
        .withf(move |request| request.author == author && request.input.title == "Заголовок")
        .times(1)
        .return_once(move |_| Ok(note(author, "zagolovok")));
    let app = test::init_service(test_app(state(notes, MockNotesQuery::new()))).await;
    let cookie = login_cookie(&app, author).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/notes/add/")
            .cookie(cookie)
            .set_form([("title", "Заголовок"), ("text", "Текст")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/notes/done/")
    );
}

#[rstest]
#[actix_web::test]
async fn rejected_note_is_rerendered_with_errors() {
    let author = UserId::random();
    let mut notes = MockNotesCommand::new();
    notes.expect_create().times(1).return_once(|_| {
        Err(Error::validation(FieldErrors::single(
            "slug",
            duplicate_slug_message("taken"),
        )))
    });
    let app = test::init_service(test_app(state(notes, MockNotesQuery::new()))).await;
    let cookie = login_cookie(&app, author).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/notes/add/")
            .cookie(cookie)
            .set_form([("title", "Заголовок"), ("text", "Текст"), ("slug", "taken")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["form"]["values"]["slug"], "taken");
    assert_eq!(
        body["form"]["errors"]["slug"][0],
        duplicate_slug_message("taken")
    );
}

#[rstest]
#[actix_web::test]
async fn foreign_note_detail_is_not_found() {
    let reader = UserId::random();
    let mut query = MockNotesQuery::new();
    query
        .expect_get_owned()
        .with(eq(reader), eq(Slug::new("note-slug").expect("valid slug")))
        .times(1)
        .return_once(|_, _| Err(Error::not_found("note not found")));
    let app = test::init_service(test_app(state(MockNotesCommand::new(), query))).await;
    let cookie = login_cookie(&app, reader).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/notes/note/note-slug/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn malformed_slug_is_not_found_without_touching_ports() {
    let app = test::init_service(test_app(state(
        MockNotesCommand::new(),
        MockNotesQuery::new(),
    )))
    .await;
    let cookie = login_cookie(&app, UserId::random()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/notes/edit/%D0%B7%D0%B0%D0%BC%D0%B5%D1%82%D0%BA%D0%B0/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn edit_page_prefills_form_from_note() {
    let author = UserId::random();
    let mut query = MockNotesQuery::new();
    query
        .expect_get_owned()
        .times(1)
        .return_once(move |_, _| Ok(note(author, "note-slug")));
    let app = test::init_service(test_app(state(MockNotesCommand::new(), query))).await;
    let cookie = login_cookie(&app, author).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/notes/edit/note-slug/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["form"]["values"]["title"], "Заголовок");
    assert_eq!(body["form"]["values"]["slug"], "note-slug");
    assert_eq!(body["form"]["errors"], serde_json::json!({}));
}

#[rstest]
#[case::post(test::TestRequest::post())]
#[case::delete(test::TestRequest::delete())]
#[actix_web::test]
async fn delete_redirects_to_success_page(#[case] request: test::TestRequest) {
    let author = UserId::random();
    let mut notes = MockNotesCommand::new();
    notes
        .expect_delete()
        .with(eq(author), eq(Slug::new("note-slug").expect("valid slug")))
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = test::init_service(test_app(state(notes, MockNotesQuery::new()))).await;
    let cookie = login_cookie(&app, author).await;

    let res = test::call_service(
        &app,
        request
            .uri("/notes/delete/note-slug/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/notes/done/")
    );
}

#[rstest]
#[actix_web::test]
async fn home_reports_authentication() {
    let app = test::init_service(test_app(state(
        MockNotesCommand::new(),
        MockNotesQuery::new(),
    )))
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/notes/").to_request()).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, serde_json::json!({"authenticated": false}));
}
