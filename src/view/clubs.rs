use maud::{Markup, html};

use super::index::render_layout;
use crate::model::ClubSet;

#[must_use]
pub fn render_club_list(clubs: &ClubSet) -> Markup {
    html! {
        div id="club-manager" class="club-manager" {
            form class="club-add" hx-post="/clubs/add" hx-target="#club-manager" hx-swap="outerHTML" {
                input name="name" placeholder="New club (e.g. 4H)";
                button type="submit" { "Add" }
            }
            div class="club-list" {
                @for name in clubs.names() {
                    div class="club-item" {
                        div class="club-name" {
                            (name)
                            @if ClubSet::is_default(name) { " (default)" }
                        }
                        button type="button" class="small danger inline"
                            hx-post="/clubs/remove" hx-vals=(serde_json::json!({ "name": name }).to_string())
                            hx-target="#club-manager" hx-swap="outerHTML" { "Remove" }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_clubs_page(clubs: &ClubSet) -> Markup {
    let body = html! {
        section class="clubs" {
            h2 { "Manage Clubs" }
            p { "Swings keep their club even after it is removed here." }
            (render_club_list(clubs))
        }
    };
    render_layout("Clubs", &body)
}
