use actix_web::Responder;
use actix_web::web::Form;
use serde::Deserialize;

use super::html;
use super::state::{Workspace, WorkspaceData};
use crate::view::clubs::{render_club_list, render_clubs_page};

#[derive(Deserialize)]
pub struct ClubForm {
    pub name: String,
}

fn persist(ws: &Workspace) {
    if let Err(e) = ws.clubs.save(ws.kv.as_ref()) {
        log::warn!("event=clubs_save module=controller status=error error={e}");
    }
}

pub async fn page(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    html(render_clubs_page(&ws.clubs))
}

pub async fn add(form: Form<ClubForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    if ws.clubs.add(&form.name) {
        persist(&ws);
    }
    html(render_club_list(&ws.clubs))
}

pub async fn remove(form: Form<ClubForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    if ws.clubs.remove(&form.name) {
        persist(&ws);
    }
    html(render_club_list(&ws.clubs))
}
