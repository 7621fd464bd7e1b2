use actix_web::web::{self, Form};
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use super::html;
use super::state::{Workspace, WorkspaceData};
use crate::model::{HoleCount, SwingUpdate};
use crate::projector::HeatmapView;
use crate::view::render_main_page;
use crate::view::scorecard::render_panel;
use crate::view::summary::render_summary;

#[derive(Deserialize)]
pub struct HoleForm {
    pub hole: usize,
}

#[derive(Deserialize)]
pub struct ParForm {
    pub hole: usize,
    pub par: String,
}

#[derive(Deserialize)]
pub struct SwingForm {
    pub hole: usize,
    pub swing: usize,
}

#[derive(Deserialize)]
pub struct SwingUpdateForm {
    pub hole: usize,
    pub swing: usize,
    pub field: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct ParsForm {
    pub pars: String,
}

#[derive(Deserialize)]
pub struct HolesForm {
    pub holes: String,
}

#[derive(Deserialize)]
pub struct ViewForm {
    pub view: String,
}

#[derive(Deserialize)]
pub struct ShowForm {
    pub show: Option<String>,
}

fn render(ws: &Workspace) -> HttpResponse {
    html(render_panel(&ws.panel()))
}

/// `GET /scorecard?holes=9&view=back`. Unknown values are ignored.
pub async fn main_page(
    query: web::Query<HashMap<String, String>>,
    ws: WorkspaceData,
) -> impl Responder {
    let mut ws = ws.lock().await;
    if let Some(count) = query.get("holes").and_then(|h| h.parse::<HoleCount>().ok()) {
        ws.resize(count);
    }
    if let Some(view) = query.get("view").and_then(|v| v.parse::<HeatmapView>().ok()) {
        ws.heatmap.set_view(view);
    }
    html(render_main_page(&ws.panel()))
}

pub async fn panel(ws: WorkspaceData) -> impl Responder {
    render(&*ws.lock().await)
}

pub async fn summary(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    html(render_summary(ws.round.round()))
}

/// The current round as JSON; `?summary=1` returns the totals instead.
pub async fn export(
    query: web::Query<HashMap<String, String>>,
    ws: WorkspaceData,
) -> impl Responder {
    let ws = ws.lock().await;
    if query.get("summary").map(String::as_str) == Some("1") {
        return HttpResponse::Ok().json(ws.round.summary());
    }
    HttpResponse::Ok().json(json!({
        "key": ws.round.key(),
        "holes": ws.round.round(),
    }))
}

pub async fn set_par(form: Form<ParForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    // A value that is not a number keeps the previous par.
    match form.par.trim().parse::<i32>() {
        Ok(par) => ws.round.set_par(form.hole, par),
        Err(_) => log::debug!(
            "event=set_par module=controller status=ignored hole={} value={}",
            form.hole,
            form.par
        ),
    }
    render(&ws)
}

pub async fn apply_bulk_pars(form: Form<ParsForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    ws.round.apply_bulk_pars(&form.pars);
    render(&ws)
}

pub async fn set_holes(form: Form<HolesForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    match form.holes.parse::<HoleCount>() {
        Ok(count) => ws.resize(count),
        Err(e) => log::debug!("event=set_holes module=controller status=ignored error={e}"),
    }
    render(&ws)
}

pub async fn add_swing(form: Form<HoleForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    ws.round.add_swing(form.hole);
    render(&ws)
}

pub async fn remove_last_swing(form: Form<HoleForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    ws.round.remove_last_swing(form.hole);
    render(&ws)
}

pub async fn update_swing(form: Form<SwingUpdateForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let form = form.into_inner();
    match SwingUpdate::parse(&form.field, &form.value) {
        Some(update) => ws.round.update_swing(form.hole, form.swing, update),
        None => log::debug!(
            "event=update_swing module=controller status=ignored field={}",
            form.field
        ),
    }
    render(&ws)
}

pub async fn remove_swing(form: Form<SwingForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    ws.round.remove_swing(form.hole, form.swing);
    render(&ws)
}

pub async fn complete_hole(form: Form<HoleForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    if ws.round.complete_hole(form.hole).is_none() {
        log::debug!(
            "event=complete_hole module=controller status=ignored hole={}",
            form.hole
        );
    }
    render(&ws)
}

pub async fn reset(ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    ws.round.reset_round();
    render(&ws)
}

pub async fn toggle_hole(form: Form<HoleForm>, ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    ws.round.toggle_hole(form.hole);
    render(&ws)
}

pub async fn dismiss_celebration(ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    ws.round.dismiss_celebration();
    render(&ws)
}

pub async fn select_hole(form: Form<HoleForm>, ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    ws.heatmap.select(form.hole);
    render(&ws)
}

pub async fn set_heatmap_view(form: Form<ViewForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    if let Ok(view) = form.view.parse::<HeatmapView>() {
        ws.heatmap.set_view(view);
    }
    render(&ws)
}

pub async fn toggle_heatmap(form: Form<ShowForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    ws.show_heatmap = form.show.is_some();
    render(&ws)
}
