use actix_web::web::Form;
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use std::collections::BTreeMap;

use super::state::{Workspace, WorkspaceData};
use super::{html, now_millis};
use crate::model::HoleCount;
use crate::model::account::AccountError;
use crate::view::account::{render_account, render_account_page};

#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct RoundForm {
    pub id: String,
}

fn fragment(ws: &Workspace, message: Option<&str>) -> HttpResponse {
    let user = ws.accounts.current();
    let rounds = user
        .map(|u| ws.accounts.load_rounds(&u.email))
        .unwrap_or_default();
    html(render_account(user, &rounds, message))
}

fn outcome<T>(ws: &Workspace, result: Result<T, AccountError>, ok: &str) -> HttpResponse {
    match result {
        Ok(_) => fragment(ws, Some(ok)),
        Err(e) => {
            log::debug!("event=account module=controller status=rejected error={e}");
            fragment(ws, Some(&e.to_string()))
        }
    }
}

pub async fn page(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    let user = ws.accounts.current();
    let rounds = user
        .map(|u| ws.accounts.load_rounds(&u.email))
        .unwrap_or_else(BTreeMap::new);
    html(render_account_page(user, &rounds))
}

pub async fn register(form: Form<RegisterForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let result = ws.accounts.register(&form.email, &form.name, &form.password);
    outcome(&ws, result, "Account created.")
}

pub async fn sign_in(form: Form<SignInForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let result = ws.accounts.sign_in(&form.email, &form.password);
    outcome(&ws, result, "Signed in.")
}

pub async fn sign_out(ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let result = ws.accounts.sign_out();
    outcome(&ws, result, "Signed out.")
}

pub async fn edit_profile(form: Form<ProfileForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let Some(email) = ws.accounts.current().map(|u| u.email.clone()) else {
        return fragment(&ws, Some(&AccountError::NotSignedIn.to_string()));
    };
    let result = ws
        .accounts
        .edit_profile(&email, form.name.as_deref(), form.password.as_deref());
    outcome(&ws, result, "Profile updated.")
}

pub async fn save_round(ws: WorkspaceData) -> impl Responder {
    let ws = ws.lock().await;
    let result = ws.accounts.save_round(ws.round.round(), now_millis());
    outcome(&ws, result, "Round saved to your account.")
}

pub async fn load_round(form: Form<RoundForm>, ws: WorkspaceData) -> impl Responder {
    let mut ws = ws.lock().await;
    let Some(email) = ws.accounts.current().map(|u| u.email.clone()) else {
        return fragment(&ws, Some(&AccountError::NotSignedIn.to_string()));
    };
    let Some(saved) = ws.accounts.load_rounds(&email).remove(&form.id) else {
        return fragment(&ws, Some("That round no longer exists."));
    };
    if let Some(count) = HoleCount::from_count(saved.data.len()) {
        ws.resize(count);
    }
    ws.round.replace_round(saved.data);
    fragment(&ws, Some("Round loaded into the scorecard."))
}
