use actix_web::web::{self, Form};
use actix_web::{HttpRequest, HttpResponse, Responder};
use chrono::Local;
use serde::Deserialize;

use super::state::{Workspace, WorkspaceData};
use super::{html, is_htmx, see_other};
use crate::model::HoleCount;
use crate::view::history::{render_game_view, render_history, render_history_page};

#[derive(Deserialize)]
pub struct SaveForm {
    pub name: String,
}

#[derive(Deserialize)]
pub struct GameForm {
    pub id: i64,
}

fn fragment(ws: &Workspace, notice: &str) -> HttpResponse {
    html(render_history(&ws.saved, Some(notice)))
}

pub async fn page(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    html(render_history_page(&ws.saved))
}

pub async fn view(path: web::Path<i64>, ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    match ws.saved.get(path.into_inner()) {
        Some(game) => html(render_game_view(game)),
        None => HttpResponse::NotFound().body("Saved game not found"),
    }
}

pub async fn save(form: Form<SaveForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let ws = &mut *ws;
    let result = ws
        .saved
        .save(ws.kv.as_ref(), &form.name, ws.round.round(), Local::now());
    let notice = match result {
        Ok(Some(_)) => "Game saved.",
        Ok(None) => "Enter a name for this game.",
        Err(e) => {
            log::warn!("event=game_save module=controller status=error error={e}");
            "Could not save this game."
        }
    };
    fragment(ws, notice)
}

/// Loads a saved game into the scorecard, switching hole count when the game needs it.
pub async fn load(req: HttpRequest, form: Form<GameForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let Some(game) = ws.saved.get(form.id).cloned() else {
        return fragment(&ws, "That game no longer exists.");
    };
    if let Some(count) = HoleCount::from_count(game.data.len()) {
        ws.resize(count);
    }
    ws.round.replace_round(game.data);
    log::info!("event=game_loaded module=controller status=ok id={}", game.id);
    if is_htmx(&req) {
        fragment(&ws, "Game loaded into the scorecard.")
    } else {
        see_other("/scorecard")
    }
}

pub async fn delete(form: Form<GameForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let ws = &mut *ws;
    let notice = match ws.saved.delete(ws.kv.as_ref(), form.id) {
        Ok(true) => "Game deleted.",
        Ok(false) => "That game no longer exists.",
        Err(e) => {
            log::warn!("event=game_delete module=controller status=error error={e}");
            "Could not delete this game."
        }
    };
    fragment(ws, notice)
}
