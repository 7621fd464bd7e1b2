use maud::{DOCTYPE, Markup, html};

use crate::HTMX_PATH;
use crate::model::RoundSummary;
use crate::model::account::UserSummary;
use crate::model::score::format_diff;

pub const APP_TITLE: &str = "Greenway";

/// Page shell shared by every full-page route.
#[must_use]
pub fn render_layout(title: &str, body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" type="text/css" href="/static/greenway.css";
                title { (title) " | " (APP_TITLE) }
                script src=(HTMX_PATH) defer {}
            }
            body {
                header class="site-header" {
                    div class="brand" {
                        div class="logo" { "⛳" }
                        div class="title" { (APP_TITLE) }
                    }
                    nav class="nav" {
                        a href="/" { "Home" }
                        a href="/scorecard" { "Main" }
                        a href="/clubs" { "Clubs" }
                        a href="/history" { "History" }
                        a href="/account" { "Account" }
                        a href="/session" { "Session" }
                        a href="/about" { "About" }
                    }
                }
                main { (body) }
            }
        }
    }
}

#[must_use]
pub fn render_home(user: Option<&UserSummary>, summary: &RoundSummary) -> Markup {
    let body = html! {
        section class="home" {
            div class="hero" {
                h1 { "Welcome to " (APP_TITLE) }
                p { "Track your rounds, strokes, and enjoy a modern golf-themed scorecard." }
            }
            div class="cards" {
                div class="card" {
                    h3 { "Quick Start" }
                    p { "Go to " a href="/scorecard" { "Main" } " to start a new 9 or 18 hole scorecard." }
                }
                div class="card" id="current-round" {
                    h3 { "Current Round" }
                    p {
                        (summary.completed_holes) "/" (summary.holes) " holes complete, "
                        (summary.total_strokes) " strokes (" (format_diff(summary.diff)) ")"
                    }
                }
                div class="card profile" {
                    @if let Some(user) = user {
                        h3 { "Signed in" }
                        p { (user.name) " (" (user.email) ")" }
                    } @else {
                        h3 { "Guest" }
                        p { a href="/account" { "Sign in" } " to keep rounds under your account." }
                    }
                }
            }
        }
    };
    render_layout("Home", &body)
}

#[must_use]
pub fn render_about() -> Markup {
    let body = html! {
        section class="about" {
            h2 { "About " (APP_TITLE) }
            p {
                "This lightweight app helps golfers track scores for 9 or 18 hole rounds. "
                "Data is saved locally on this machine."
            }
        }
    };
    render_layout("About", &body)
}
