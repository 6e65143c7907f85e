//! Notes pages.
//!
//! ```text
//! GET          /notes/                  public landing page
//! GET|POST     /notes/add/              create a note
//! GET          /notes/list/             the caller's notes
//! GET          /notes/done/             confirmation after a change
//! GET          /notes/note/{slug}/      owner only
//! GET|POST     /notes/edit/{slug}/      owner only
//! GET|POST|DEL /notes/delete/{slug}/    owner only
//! ```
//!
//! A slug that is unknown or belongs to someone else answers 404.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use super::error::ApiResult;
use super::forms::{FormContext, form_errors, invalid_form};
use super::login_required::{CurrentUser, MaybeUser};
use super::routes::{Route, redirect};
use super::state::HttpState;
use crate::domain::ports::{CreateNoteRequest, EditNoteRequest};
use crate::domain::{Error, Note, NoteInput, Slug};

/// Message shown on the confirmation page.
pub const SUCCESS_MESSAGE: &str = "Успешно!";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListPage {
    pub object_list: Vec<Note>,
}

#[derive(Debug, Serialize)]
pub struct NotePage {
    pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct NoteFormPage {
    pub form: FormContext<NoteInput>,
}

#[derive(Debug, Serialize)]
pub struct SuccessPage {
    pub message: &'static str,
}

fn parse_slug(raw: &str) -> Result<Slug, Error> {
    Slug::new(raw).map_err(|_| Error::not_found("note not found"))
}

fn note_form(form: FormContext<NoteInput>) -> NoteFormPage {
    NoteFormPage { form }
}

/// `GET /notes/`.
pub async fn home(user: MaybeUser) -> web::Json<HomePage> {
    web::Json(HomePage {
        authenticated: user.is_authenticated(),
    })
}

/// `GET /notes/add/`.
pub async fn add_page(_user: CurrentUser) -> web::Json<NoteFormPage> {
    web::Json(note_form(FormContext::unbound(NoteInput::default())))
}

/// `POST /notes/add/`.
pub async fn add(
    user: CurrentUser,
    state: web::Data<HttpState>,
    form: web::Form<NoteInput>,
) -> ApiResult<HttpResponse> {
    let input = form.into_inner();
    let request = CreateNoteRequest {
        author: user.id(),
        input: input.clone(),
    };
    match state.notes.create(request).await {
        Ok(_) => Ok(redirect(Route::NotesSuccess.path())),
        Err(error) => {
            let errors = form_errors(error)?;
            Ok(invalid_form(&note_form(FormContext::bound(input, errors))))
        }
    }
}

/// `GET /notes/list/`.
pub async fn list(
    user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<NoteListPage>> {
    let object_list = state.notes_query.list(user.id()).await?;
    Ok(web::Json(NoteListPage { object_list }))
}

/// `GET /notes/done/`.
pub async fn success(_user: CurrentUser) -> web::Json<SuccessPage> {
    web::Json(SuccessPage {
        message: SUCCESS_MESSAGE,
    })
}

/// `GET /notes/note/{slug}/`.
pub async fn detail(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NotePage>> {
    let slug = parse_slug(&path)?;
    let note = state.notes_query.get_owned(user.id(), slug).await?;
    Ok(web::Json(NotePage { note }))
}

/// `GET /notes/edit/{slug}/`.
pub async fn edit_page(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NoteFormPage>> {
    let slug = parse_slug(&path)?;
    let note = state.notes_query.get_owned(user.id(), slug).await?;
    Ok(web::Json(note_form(FormContext::unbound(NoteInput::from(
        &note,
    )))))
}

/// `POST /notes/edit/{slug}/`.
pub async fn edit(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<NoteInput>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let input = form.into_inner();
    let request = EditNoteRequest {
        author: user.id(),
        slug,
        input: input.clone(),
    };
    match state.notes.edit(request).await {
        Ok(_) => Ok(redirect(Route::NotesSuccess.path())),
        Err(error) => {
            let errors = form_errors(error)?;
            Ok(invalid_form(&note_form(FormContext::bound(input, errors))))
        }
    }
}

/// `GET /notes/delete/{slug}/`: confirmation page.
pub async fn delete_page(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NotePage>> {
    let slug = parse_slug(&path)?;
    let note = state.notes_query.get_owned(user.id(), slug).await?;
    Ok(web::Json(NotePage { note }))
}

/// `POST|DELETE /notes/delete/{slug}/`.
pub async fn delete(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    state.notes.delete(user.id(), slug).await?;
    Ok(redirect(Route::NotesSuccess.path()))
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
