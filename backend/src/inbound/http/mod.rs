//! HTTP inbound adapter.
//!
//! Handlers render JSON page contexts and talk to the domain only through
//! the ports bundled in [`state::HttpState`]. [`configure_routes`] registers
//! every page under its route name.

pub mod error;
pub mod forms;
pub mod health;
pub mod login_required;
pub mod news;
pub mod notes;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

use routes::Route;

pub use error::ApiResult;

/// Register every page and health endpoint on `cfg`.
///
/// Expects [`state::HttpState`] and [`health::HealthState`] as app data and a
/// session middleware around the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        Route::NotesHome
            .resource()
            .route(web::get().to(notes::home)),
    )
    .service(
        Route::NotesAdd
            .resource()
            .route(web::get().to(notes::add_page))
            .route(web::post().to(notes::add)),
    )
    .service(
        Route::NotesList
            .resource()
            .route(web::get().to(notes::list)),
    )
    .service(
        Route::NotesSuccess
            .resource()
            .route(web::get().to(notes::success)),
    )
    .service(
        Route::NotesDetail
            .resource()
            .route(web::get().to(notes::detail)),
    )
    .service(
        Route::NotesEdit
            .resource()
            .route(web::get().to(notes::edit_page))
            .route(web::post().to(notes::edit)),
    )
    .service(
        Route::NotesDelete
            .resource()
            .route(web::get().to(notes::delete_page))
            .route(web::post().to(notes::delete))
            .route(web::delete().to(notes::delete)),
    )
    .service(
        Route::NewsHome
            .resource()
            .route(web::get().to(news::home)),
    )
    .service(
        Route::NewsDetail
            .resource()
            .route(web::get().to(news::detail))
            .route(web::post().to(news::add_comment)),
    )
    .service(
        Route::CommentEdit
            .resource()
            .route(web::get().to(news::edit_page))
            .route(web::post().to(news::edit)),
    )
    .service(
        Route::CommentDelete
            .resource()
            .route(web::get().to(news::delete_page))
            .route(web::post().to(news::delete)),
    )
    .service(
        Route::Login
            .resource()
            .route(web::get().to(users::login_page))
            .route(web::post().to(users::login)),
    )
    .service(
        Route::Logout
            .resource()
            .route(web::get().to(users::logout))
            .route(web::post().to(users::logout)),
    )
    .service(
        Route::Signup
            .resource()
            .route(web::get().to(users::signup_page))
            .route(web::post().to(users::signup)),
    )
    .route("/health/ready", web::get().to(health::ready))
    .route("/health/live", web::get().to(health::live));
}
