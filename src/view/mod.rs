pub mod account;
pub mod clubs;
pub mod heatmap;
pub mod history;
pub mod index;
pub mod scorecard;
pub mod session;
pub mod summary;

use maud::{Markup, html};

use self::index::render_layout;
use self::scorecard::{Panel, render_panel};

/// Full main page: heatmap, controls, scorecard and summary.
#[must_use]
pub fn render_main_page(panel: &Panel<'_>) -> Markup {
    let body = html! {
        section class="main" {
            (render_panel(panel))
        }
    };
    render_layout("Scorecard", &body)
}
