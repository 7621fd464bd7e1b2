pub mod account;
pub mod clubs;
pub mod history;
pub mod pages;
pub mod scorecard;
pub mod session;
pub mod state;

use actix_web::{HttpRequest, HttpResponse, web};
use maud::Markup;

pub use state::{Workspace, WorkspaceData};

pub(crate) fn html(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

pub(crate) fn is_htmx(req: &HttpRequest) -> bool {
    req.headers().contains_key("HX-Request")
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Registers every route. Expects `Data<tokio::sync::Mutex<Workspace>>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::home))
        .route("/about", web::get().to(pages::about))
        .route("/health", web::get().to(HttpResponse::Ok))
        .route("/scorecard", web::get().to(scorecard::main_page))
        .route("/scorecard/panel", web::get().to(scorecard::panel))
        .route("/scorecard/export", web::get().to(scorecard::export))
        .route("/scorecard/summary", web::get().to(scorecard::summary))
        .route("/scorecard/par", web::post().to(scorecard::set_par))
        .route("/scorecard/pars", web::post().to(scorecard::apply_bulk_pars))
        .route("/scorecard/holes", web::post().to(scorecard::set_holes))
        .route("/scorecard/swing/add", web::post().to(scorecard::add_swing))
        .route(
            "/scorecard/swing/remove-last",
            web::post().to(scorecard::remove_last_swing),
        )
        .route("/scorecard/swing/update", web::post().to(scorecard::update_swing))
        .route("/scorecard/swing/remove", web::post().to(scorecard::remove_swing))
        .route("/scorecard/complete", web::post().to(scorecard::complete_hole))
        .route("/scorecard/reset", web::post().to(scorecard::reset))
        .route("/scorecard/toggle", web::post().to(scorecard::toggle_hole))
        .route(
            "/scorecard/celebration/dismiss",
            web::post().to(scorecard::dismiss_celebration),
        )
        .route("/heatmap/select", web::post().to(scorecard::select_hole))
        .route("/heatmap/view", web::post().to(scorecard::set_heatmap_view))
        .route("/heatmap/toggle", web::post().to(scorecard::toggle_heatmap))
        .route("/clubs", web::get().to(clubs::page))
        .route("/clubs/add", web::post().to(clubs::add))
        .route("/clubs/remove", web::post().to(clubs::remove))
        .route("/history", web::get().to(history::page))
        .route("/history/save", web::post().to(history::save))
        .route("/history/load", web::post().to(history::load))
        .route("/history/delete", web::post().to(history::delete))
        .route("/history/{id}", web::get().to(history::view))
        .route("/account", web::get().to(account::page))
        .route("/account/register", web::post().to(account::register))
        .route("/account/signin", web::post().to(account::sign_in))
        .route("/account/signout", web::post().to(account::sign_out))
        .route("/account/profile", web::post().to(account::edit_profile))
        .route("/account/rounds/save", web::post().to(account::save_round))
        .route("/account/rounds/load", web::post().to(account::load_round))
        .route("/session", web::get().to(session::page))
        .route("/session/create", web::post().to(session::create))
        .route("/session/players/add", web::post().to(session::add_player))
        .route("/session/players/remove", web::post().to(session::remove_player))
        .route("/session/score", web::post().to(session::update_score))
        .route("/session/export", web::get().to(session::export));
}
