//! Named routes.
//!
//! Every page has a stable `app:page` name and a path pattern. Handlers build
//! redirect targets through [`Route::path`] and [`Route::path_with`], and
//! [`super::configure_routes`] registers each resource from the same table.

use std::fmt;

use actix_web::http::header;
use actix_web::{HttpResponse, Resource, web};

use crate::domain::NewsId;

/// A page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    NotesHome,
    NotesAdd,
    NotesList,
    NotesSuccess,
    NotesDetail,
    NotesEdit,
    NotesDelete,
    NewsHome,
    NewsDetail,
    CommentEdit,
    CommentDelete,
    Login,
    Logout,
    Signup,
}

impl Route {
    /// Every page, in registration order.
    pub const ALL: [Self; 14] = [
        Self::NotesHome,
        Self::NotesAdd,
        Self::NotesList,
        Self::NotesSuccess,
        Self::NotesDetail,
        Self::NotesEdit,
        Self::NotesDelete,
        Self::NewsHome,
        Self::NewsDetail,
        Self::CommentEdit,
        Self::CommentDelete,
        Self::Login,
        Self::Logout,
        Self::Signup,
    ];

    /// Route name in `app:page` form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotesHome => "notes:home",
            Self::NotesAdd => "notes:add",
            Self::NotesList => "notes:list",
            Self::NotesSuccess => "notes:success",
            Self::NotesDetail => "notes:detail",
            Self::NotesEdit => "notes:edit",
            Self::NotesDelete => "notes:delete",
            Self::NewsHome => "news:home",
            Self::NewsDetail => "news:detail",
            Self::CommentEdit => "news:edit",
            Self::CommentDelete => "news:delete",
            Self::Login => "users:login",
            Self::Logout => "users:logout",
            Self::Signup => "users:signup",
        }
    }

    /// Resource pattern; parameterised pages carry one `{…}` segment.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::NotesHome => "/notes/",
            Self::NotesAdd => "/notes/add/",
            Self::NotesList => "/notes/list/",
            Self::NotesSuccess => "/notes/done/",
            Self::NotesDetail => "/notes/note/{slug}/",
            Self::NotesEdit => "/notes/edit/{slug}/",
            Self::NotesDelete => "/notes/delete/{slug}/",
            Self::NewsHome => "/news/",
            Self::NewsDetail => "/news/{id}/",
            Self::CommentEdit => "/news/edit_comment/{id}/",
            Self::CommentDelete => "/news/delete_comment/{id}/",
            Self::Login => "/auth/login/",
            Self::Logout => "/auth/logout/",
            Self::Signup => "/auth/signup/",
        }
    }

    /// Named resource for this page, ready for its method routes.
    #[must_use]
    pub fn resource(self) -> Resource {
        web::resource(self.pattern()).name(self.name())
    }

    /// Path of a page without parameters.
    #[must_use]
    pub const fn path(self) -> &'static str {
        self.pattern()
    }

    /// Path of a parameterised page with `param` in its `{…}` segment.
    #[must_use]
    pub fn path_with(self, param: impl fmt::Display) -> String {
        let pattern = self.pattern();
        let parts = pattern
            .split_once('{')
            .and_then(|(head, rest)| rest.split_once('}').map(|(_, tail)| (head, tail)));
        match parts {
            Some((head, tail)) => format!("{head}{param}{tail}"),
            None => pattern.to_owned(),
        }
    }
}

/// Comment thread anchor of a news item.
#[must_use]
pub fn comments_anchor(news: NewsId) -> String {
    format!("{}#comments", Route::NewsDetail.path_with(news))
}

/// `302 Found` pointing at `location`.
#[must_use]
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::CommentId;
    use crate::inbound::http::configure_routes;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpRequest};
    use rstest::rstest;

    #[rstest]
    #[case(Route::NotesDetail, "note-slug", "/notes/note/note-slug/")]
    #[case(Route::NotesEdit, "note-slug", "/notes/edit/note-slug/")]
    #[case(Route::NotesDelete, "note-slug", "/notes/delete/note-slug/")]
    #[case(Route::NewsDetail, "7", "/news/7/")]
    #[case(Route::CommentEdit, "3", "/news/edit_comment/3/")]
    #[case(Route::CommentDelete, "3", "/news/delete_comment/3/")]
    fn parameterised_paths_embed_their_argument(
        #[case] route: Route,
        #[case] param: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(route.path_with(param), expected);
    }

    #[rstest]
    fn static_pages_ignore_parameters() {
        assert_eq!(Route::NotesList.path_with("ignored"), "/notes/list/");
        assert_eq!(Route::Login.path(), "/auth/login/");
    }

    #[rstest]
    fn comments_anchor_targets_thread() {
        assert_eq!(comments_anchor(NewsId::new(5)), "/news/5/#comments");
        assert_eq!(
            Route::CommentEdit.path_with(CommentId::new(9)),
            "/news/edit_comment/9/"
        );
    }

    #[rstest]
    fn names_and_patterns_are_unique() {
        let names: HashSet<_> = Route::ALL.iter().map(|route| route.name()).collect();
        let patterns: HashSet<_> = Route::ALL.iter().map(|route| route.pattern()).collect();
        assert_eq!(names.len(), Route::ALL.len());
        assert_eq!(patterns.len(), Route::ALL.len());
    }

    #[actix_web::test]
    async fn every_page_is_registered_under_its_name() {
        let app = actix_test::init_service(App::new().configure(configure_routes).route(
            "/__names",
            web::get().to(|req: HttpRequest| async move {
                let resolved: Vec<String> = Route::ALL
                    .iter()
                    .map(|route| {
                        req.url_for(route.name(), ["x"])
                            .map(|url| url.path().to_owned())
                            .unwrap_or_else(|err| format!("unresolved {}: {err}", route.name()))
                    })
                    .collect();
                HttpResponse::Ok().json(resolved)
            }),
        ))
        .await;

        let resolved: Vec<String> = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/__names").to_request(),
        )
        .await;
        let expected: Vec<String> = Route::ALL
            .iter()
            .map(|route| route.path_with("x"))
            .collect();
        assert_eq!(resolved, expected);
    }

    #[rstest]
    fn redirect_sets_location() {
        let response = redirect("/news/");
        assert_eq!(response.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/news/")
        );
    }
}
