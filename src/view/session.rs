use maud::{Markup, html};

use super::index::render_layout;
use crate::model::session::{Player, Session};

fn render_player(player: &Player) -> Markup {
    let total: u32 = player.scores.iter().map(|s| s.strokes).sum();
    html! {
        tr class="player" data-id=(player.id) {
            td class="player-name" { (player.name) }
            @for (idx, score) in player.scores.iter().enumerate() {
                td {
                    form hx-post="/session/score" hx-trigger="change" hx-target="#session" hx-swap="outerHTML" {
                        input type="hidden" name="player_id" value=(player.id);
                        input type="hidden" name="hole" value=(idx);
                        input type="number" name="strokes" min="0" value=(score.strokes);
                    }
                }
            }
            td class="player-total" { (total) }
            td {
                button class="small danger" hx-post="/session/players/remove"
                    hx-vals=(serde_json::json!({ "id": player.id }).to_string())
                    hx-target="#session" hx-swap="outerHTML" { "Remove" }
            }
        }
    }
}

/// Session fragment swapped by every session form.
#[must_use]
pub fn render_session(session: &Session, remote: bool) -> Markup {
    html! {
        div id="session" class="session" {
            p class="sync-status" {
                @if remote { "Synced with remote backend." } @else { "Local only (no remote backend configured)." }
            }
            form class="create-session" hx-post="/session/create" hx-target="#session" hx-swap="outerHTML" {
                input name="name" placeholder="Session name";
                select name="holes" {
                    option value="9" selected[session.holes == 9] { "9" }
                    option value="18" selected[session.holes != 9] { "18" }
                }
                button type="submit" { "New Session" }
            }
            @if let Some(id) = &session.id {
                h3 { (session.name) " " small class="session-id" { (id) } }
                form class="add-player" hx-post="/session/players/add" hx-target="#session" hx-swap="outerHTML" {
                    input name="name" placeholder="Player name" required;
                    input name="email" type="email" placeholder="Email (optional)";
                    button type="submit" { "Add Player" }
                }
                @if session.players.is_empty() {
                    p class="no-players" { "No players yet." }
                } @else {
                    table class="session-scores" {
                        thead {
                            tr {
                                th { "Player" }
                                @for hole in 1..=session.holes { th { (hole) } }
                                th { "Total" }
                                th {}
                            }
                        }
                        tbody {
                            @for player in &session.players { (render_player(player)) }
                        }
                    }
                }
                a class="button" href="/session/export" download="session.json" { "Export JSON" }
            }
        }
    }
}

#[must_use]
pub fn render_session_page(session: &Session, remote: bool) -> Markup {
    let body = html! {
        section class="session-page" {
            h2 { "Multiplayer Session" }
            (render_session(session, remote))
        }
    };
    render_layout("Session", &body)
}
