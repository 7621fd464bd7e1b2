use actix_web::Responder;

use super::html;
use super::state::WorkspaceData;
use crate::view::index::{render_about, render_home};

pub async fn home(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    html(render_home(ws.accounts.current(), &ws.round.summary()))
}

pub async fn about() -> impl Responder {
    html(render_about())
}
