use maud::{Markup, html};

use super::index::render_layout;
use super::summary::render_summary;
use crate::model::saved_games::{MAX_GAME_NAME_CHARS, MAX_SAVED_GAMES};
use crate::model::{SavedGame, SavedGames};

fn render_game(game: &SavedGame) -> Markup {
    let vals = |id: i64| format!(r#"{{"id":{id}}}"#);
    html! {
        div class="game-item" data-id=(game.id) {
            div class="game-info" {
                div class="game-name" { (game.name) }
                div class="game-meta" { (game.date) " " (game.time) " · " (game.data.len()) " holes" }
                div class="game-stats" {
                    "Strokes: " (game.total_strokes) " · Par: " (game.total_par)
                    " · Completed: " (game.completed_holes)
                }
            }
            div class="game-actions" {
                a class="view-button" href=(format!("/history/{}", game.id)) { "View" }
                button class="load-button" hx-post="/history/load" hx-vals=(vals(game.id))
                    hx-target="#game-history" hx-swap="outerHTML" { "Load" }
                button class="delete-button" hx-post="/history/delete" hx-vals=(vals(game.id))
                    hx-confirm="Delete this game?"
                    hx-target="#game-history" hx-swap="outerHTML" { "Delete" }
            }
        }
    }
}

/// The save form and list of saved games, swapped as one htmx target.
#[must_use]
pub fn render_history(games: &SavedGames, notice: Option<&str>) -> Markup {
    html! {
        div id="game-history" class="game-history" {
            @if let Some(notice) = notice {
                div class="notice" { (notice) }
            }
            div class="save-section" {
                form class="save-form" hx-post="/history/save" hx-target="#game-history" hx-swap="outerHTML" {
                    input name="name" placeholder="Game name" maxlength=(MAX_GAME_NAME_CHARS) required;
                    button type="submit" class="save-game-button" { "Save Current Game" }
                }
                p class="hint" { "Up to " (MAX_SAVED_GAMES) " games are kept; the oldest is replaced." }
            }
            div class="saved-games-section" {
                @if games.is_empty() {
                    div class="no-games" { "No saved games yet." }
                } @else {
                    div class="games-list" {
                        @for game in games.games().iter().rev() {
                            (render_game(game))
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_history_page(games: &SavedGames) -> Markup {
    let body = html! {
        section class="history" {
            h2 { "Game History" }
            (render_history(games, None))
        }
    };
    render_layout("History", &body)
}

#[must_use]
pub fn render_game_view(game: &SavedGame) -> Markup {
    let body = html! {
        section class="game-view" {
            div class="game-view-header" {
                a class="back-button" href="/history" { "← Back" }
                h2 { (game.name) }
            }
            div class="game-view-meta" { (game.date) " " (game.time) }
            (render_summary(&game.data))
            div class="game-view-actions" {
                form method="post" action="/history/load" {
                    input type="hidden" name="id" value=(game.id);
                    button type="submit" class="load-current-button" { "Load into Scorecard" }
                }
            }
        }
    };
    render_layout(&game.name, &body)
}
