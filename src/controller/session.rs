use actix_web::web::Form;
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;

use super::state::{Workspace, WorkspaceData};
use super::{html, now_millis};
use crate::model::HoleCount;
use crate::model::session::ScorePatch;
use crate::view::session::{render_session, render_session_page};

#[derive(Deserialize)]
pub struct CreateForm {
    pub name: String,
    pub holes: String,
}

#[derive(Deserialize)]
pub struct PlayerForm {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct RemovePlayerForm {
    pub id: String,
}

#[derive(Deserialize)]
pub struct ScoreForm {
    pub player_id: String,
    pub hole: usize,
    pub strokes: String,
}

fn fragment(ws: &Workspace) -> HttpResponse {
    html(render_session(&ws.session.snapshot(), ws.remote_sync))
}

pub async fn page(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    html(render_session_page(&ws.session.snapshot(), ws.remote_sync))
}

pub async fn create(form: Form<CreateForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let holes = form.holes.parse::<HoleCount>().unwrap_or_default().count();
    let session = ws.session.create(&form.name, holes, now_millis()).await;
    log::info!(
        "event=session_create module=controller status=ok id={}",
        session.id.as_deref().unwrap_or_default()
    );
    fragment(&ws)
}

/// Players are keyed by email when given, otherwise by a timestamp id.
pub async fn add_player(form: Form<PlayerForm>, ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    let name = form.name.trim();
    let email = form.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    if !name.is_empty() {
        let id = email.map_or_else(|| format!("player_{}", now_millis()), ToString::to_string);
        if !ws.session.add_player(&id, name, email) {
            log::debug!("event=add_player module=controller status=duplicate id={id}");
        }
    }
    fragment(&ws)
}

pub async fn remove_player(form: Form<RemovePlayerForm>, ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    ws.session.remove_player(&form.id);
    fragment(&ws)
}

pub async fn update_score(form: Form<ScoreForm>, ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    if let Ok(strokes) = form.strokes.trim().parse::<u32>() {
        let patch = ScorePatch {
            strokes: Some(strokes),
            swings: None,
        };
        ws.session.update_player_score(&form.player_id, form.hole, patch);
    }
    fragment(&ws)
}

pub async fn export(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    HttpResponse::Ok().json(ws.session.export())
}
