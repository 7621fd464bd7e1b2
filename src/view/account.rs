use maud::{Markup, html};
use std::collections::BTreeMap;

use super::index::render_layout;
use crate::model::account::{AccountRound, UserSummary};

fn render_signed_out() -> Markup {
    html! {
        div class="auth-forms" {
            form class="sign-in" hx-post="/account/signin" hx-target="#account" hx-swap="outerHTML" {
                h3 { "Sign in" }
                input name="email" type="email" placeholder="Email" required;
                input name="password" type="password" placeholder="Password" required;
                button type="submit" { "Sign in" }
            }
            form class="register" hx-post="/account/register" hx-target="#account" hx-swap="outerHTML" {
                h3 { "Register" }
                input name="name" placeholder="Name" required;
                input name="email" type="email" placeholder="Email" required;
                input name="password" type="password" placeholder="Password" required;
                button type="submit" { "Create account" }
            }
        }
    }
}

fn render_rounds(rounds: &BTreeMap<String, AccountRound>) -> Markup {
    html! {
        div class="account-rounds" {
            h3 { "Saved Rounds" }
            @if rounds.is_empty() {
                p class="no-rounds" { "No rounds saved to this account." }
            } @else {
                ul {
                    @for round in rounds.values().rev() {
                        li class="account-round" data-id=(round.id) {
                            (round.id) " · " (round.holes) " holes · "
                            (round.data.total_strokes()) " strokes "
                            button class="small" hx-post="/account/rounds/load"
                                hx-vals=(serde_json::json!({ "id": round.id }).to_string())
                                hx-target="#account" hx-swap="outerHTML" { "Load" }
                        }
                    }
                }
            }
        }
    }
}

fn render_signed_in(user: &UserSummary, rounds: &BTreeMap<String, AccountRound>) -> Markup {
    html! {
        div class="profile" {
            p class="who" { "Signed in as " strong { (user.name) } " (" (user.email) ")" }
            form class="edit-profile" hx-post="/account/profile" hx-target="#account" hx-swap="outerHTML" {
                h3 { "Edit profile" }
                input name="name" value=(user.name) placeholder="Name";
                input name="password" type="password" placeholder="New password (optional)";
                button type="submit" { "Save" }
            }
            div class="account-actions" {
                button hx-post="/account/rounds/save" hx-target="#account" hx-swap="outerHTML" {
                    "Save current round to account"
                }
                button class="danger" hx-post="/account/signout" hx-target="#account" hx-swap="outerHTML" {
                    "Sign out"
                }
            }
        }
        (render_rounds(rounds))
    }
}

/// Account fragment: forms when signed out, profile and rounds when signed in.
#[must_use]
pub fn render_account(
    user: Option<&UserSummary>,
    rounds: &BTreeMap<String, AccountRound>,
    message: Option<&str>,
) -> Markup {
    html! {
        div id="account" class="account" {
            @if let Some(message) = message {
                div class="notice" role="status" { (message) }
            }
            @match user {
                Some(user) => { (render_signed_in(user, rounds)) }
                None => { (render_signed_out()) }
            }
        }
    }
}

#[must_use]
pub fn render_account_page(user: Option<&UserSummary>, rounds: &BTreeMap<String, AccountRound>) -> Markup {
    let body = html! {
        section class="account-page" {
            h2 { "Account" }
            (render_account(user, rounds, None))
        }
    };
    render_layout("Account", &body)
}
