//! News pages and comment threads.
//!
//! ```text
//! GET      /news/                       latest news
//! GET      /news/{id}/                  news item and its comments
//! POST     /news/{id}/                  comment on it (login required)
//! GET|POST /news/edit_comment/{id}/     comment author only
//! GET|POST /news/delete_comment/{id}/   comment author only
//! ```

use actix_web::{HttpResponse, web};
use serde::Serialize;

use super::error::ApiResult;
use super::forms::{FormContext, form_errors, invalid_form};
use super::login_required::{CurrentUser, MaybeUser};
use super::routes::{comments_anchor, redirect};
use super::state::HttpState;
use crate::domain::ports::{AddCommentRequest, EditCommentRequest};
use crate::domain::{Comment, CommentId, CommentInput, News, NewsDetail, NewsId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsListPage {
    pub object_list: Vec<News>,
}

/// News item with its thread; `form` only for logged-in visitors.
#[derive(Debug, Serialize)]
pub struct NewsDetailPage {
    pub news: News,
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormContext<CommentInput>>,
}

impl NewsDetailPage {
    fn new(detail: NewsDetail, form: Option<FormContext<CommentInput>>) -> Self {
        let NewsDetail { news, comments } = detail;
        Self {
            news,
            comments,
            form,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentFormPage {
    pub comment: Comment,
    pub form: FormContext<CommentInput>,
}

#[derive(Debug, Serialize)]
pub struct CommentPage {
    pub comment: Comment,
}

/// `GET /news/`.
pub async fn home(state: web::Data<HttpState>) -> ApiResult<web::Json<NewsListPage>> {
    let object_list = state.news.home().await?;
    Ok(web::Json(NewsListPage { object_list }))
}

/// `GET /news/{id}/`.
pub async fn detail(
    user: MaybeUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<NewsDetailPage>> {
    let detail = state.news.detail(NewsId::new(path.into_inner())).await?;
    let form = user
        .is_authenticated()
        .then(|| FormContext::unbound(CommentInput::default()));
    Ok(web::Json(NewsDetailPage::new(detail, form)))
}

/// `POST /news/{id}/`.
pub async fn add_comment(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    form: web::Form<CommentInput>,
) -> ApiResult<HttpResponse> {
    let news = NewsId::new(path.into_inner());
    let input = form.into_inner();
    let request = AddCommentRequest {
        news,
        author: user.id(),
        input: input.clone(),
    };
    match state.comments.add(request).await {
        Ok(_) => Ok(redirect(&comments_anchor(news))),
        Err(error) => {
            let errors = form_errors(error)?;
            let detail = state.news.detail(news).await?;
            let page = NewsDetailPage::new(detail, Some(FormContext::bound(input, errors)));
            Ok(invalid_form(&page))
        }
    }
}

/// `GET /news/edit_comment/{id}/`.
pub async fn edit_page(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CommentFormPage>> {
    let comment = state
        .news
        .owned_comment(user.id(), CommentId::new(path.into_inner()))
        .await?;
    let form = FormContext::unbound(CommentInput::from(&comment));
    Ok(web::Json(CommentFormPage { comment, form }))
}

/// `POST /news/edit_comment/{id}/`.
pub async fn edit(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    form: web::Form<CommentInput>,
) -> ApiResult<HttpResponse> {
    let id = CommentId::new(path.into_inner());
    let input = form.into_inner();
    let request = EditCommentRequest {
        id,
        author: user.id(),
        input: input.clone(),
    };
    match state.comments.edit(request).await {
        Ok(comment) => Ok(redirect(&comments_anchor(comment.news))),
        Err(error) => {
            let errors = form_errors(error)?;
            let comment = state.news.owned_comment(user.id(), id).await?;
            let form = FormContext::bound(input, errors);
            Ok(invalid_form(&CommentFormPage { comment, form }))
        }
    }
}

/// `GET /news/delete_comment/{id}/`: confirmation page.
pub async fn delete_page(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CommentPage>> {
    let comment = state
        .news
        .owned_comment(user.id(), CommentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CommentPage { comment }))
}

/// `POST /news/delete_comment/{id}/`.
pub async fn delete(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let news = state
        .comments
        .delete(user.id(), CommentId::new(path.into_inner()))
        .await?;
    Ok(redirect(&comments_anchor(news)))
}

#[cfg(test)]
#[path = "news_tests.rs"]
mod tests;
