use maud::{Markup, PreEscaped, html};

use super::heatmap::render_heatmap;
use super::summary::{render_celebration, render_summary};
use crate::model::{ClubSet, HoleCount, HoleRecord, SwingRecord, Terrain, classify};
use crate::projector::{HeatmapProjection, HeatmapView};
use crate::store::RoundStore;

const PANEL_TARGET: &str = "#scorecard-panel";

/// Everything the main page panel needs for one render.
pub struct Panel<'a> {
    pub store: &'a RoundStore,
    pub projection: HeatmapProjection,
    pub view: HeatmapView,
    pub clubs: &'a ClubSet,
    pub show_heatmap: bool,
    pub scroll_to: Option<usize>,
}

#[must_use]
pub fn render_panel(panel: &Panel<'_>) -> Markup {
    let hole_count = panel.store.hole_count();
    html! {
        div id="scorecard-panel" class="main-page" {
            @if panel.show_heatmap {
                (render_heatmap(&panel.projection, panel.view))
            }
            (render_controls(hole_count, panel.view, panel.show_heatmap))
            @if let Some(celebration) = panel.store.celebration() {
                (render_celebration(celebration))
            }
            (render_scorecard(panel.store, panel.clubs))
            (render_summary(panel.store.round()))
            (render_actions())
            @if let Some(hole) = panel.scroll_to {
                script {
                    (PreEscaped(format!(
                        "document.getElementById('hole-{}')?.scrollIntoView({{behavior:'smooth',block:'center'}});",
                        hole + 1
                    )))
                }
            }
        }
    }
}

fn render_controls(hole_count: HoleCount, view: HeatmapView, show_heatmap: bool) -> Markup {
    html! {
        div class="controls" {
            form hx-post="/scorecard/holes" hx-trigger="change" hx-target=(PANEL_TARGET) hx-swap="outerHTML" {
                label {
                    "Holes: "
                    select name="holes" {
                        @for count in [HoleCount::Nine, HoleCount::Eighteen] {
                            option value=(count.count()) selected[count == hole_count] { (count.count()) }
                        }
                    }
                }
            }
            form hx-post="/heatmap/view" hx-trigger="change" hx-target=(PANEL_TARGET) hx-swap="outerHTML" {
                label {
                    "Heatmap view: "
                    select name="view" {
                        option value="all" selected[view == HeatmapView::All] { "All" }
                        option value="front" selected[view == HeatmapView::Front] { "Front 9" }
                        option value="back" selected[view == HeatmapView::Back] { "Back 9" }
                    }
                }
            }
            form hx-post="/heatmap/toggle" hx-trigger="change" hx-target=(PANEL_TARGET) hx-swap="outerHTML" {
                label {
                    input type="checkbox" name="show" value="1" checked[show_heatmap];
                    " Show heatmap"
                }
            }
        }
    }
}

fn hole_button(route: &str, hole: usize, class: &str, label: &str, disabled: bool) -> Markup {
    html! {
        button class=(class) disabled[disabled]
            hx-post=(route) hx-vals=(format!(r#"{{"hole":{hole}}}"#))
            hx-target=(PANEL_TARGET) hx-swap="outerHTML" { (label) }
    }
}

/// Wraps one swing control in a form that posts a single-field edit on change.
fn swing_field(hole: usize, swing: usize, field: &str, control: &Markup) -> Markup {
    html! {
        form class="swing-field" hx-post="/scorecard/swing/update" hx-trigger="change"
            hx-target=(PANEL_TARGET) hx-swap="outerHTML" {
            input type="hidden" name="hole" value=(hole);
            input type="hidden" name="swing" value=(swing);
            input type="hidden" name="field" value=(field);
            (control)
        }
    }
}

fn render_swing(hole: usize, idx: usize, swing: &SwingRecord, clubs: &ClubSet) -> Markup {
    let dangling = !clubs.contains(&swing.club);
    let club_select = html! {
        label { "Club"
            select name="value" {
                @if dangling {
                    option value=(swing.club) selected { (swing.club) }
                }
                @for name in clubs.names() {
                    option value=(name) selected[*name == swing.club] { (name) }
                }
            }
        }
    };
    let terrain_select = html! {
        label { "Terrain"
            select name="value" {
                @for terrain in Terrain::ALL {
                    option value=(terrain.as_str()) selected[terrain == swing.terrain] { (terrain.as_str()) }
                }
            }
        }
    };
    let feel_select = html! {
        label { "Feel"
            select name="value" {
                @for feel in 1..=5u8 {
                    option value=(feel) selected[feel == swing.satisfaction] { (feel) }
                }
            }
        }
    };
    let notes_input = html! {
        label class="notes" { "Notes"
            input name="value" value=(swing.notes) placeholder="short note";
        }
    };
    html! {
        div class={ "swing feel-" (swing.satisfaction) } {
            div class="swing-index" { "#" (idx + 1) }
            (swing_field(hole, idx, "club", &club_select))
            (swing_field(hole, idx, "terrain", &terrain_select))
            (swing_field(hole, idx, "satisfaction", &feel_select))
            (swing_field(hole, idx, "notes", &notes_input))
            button class="small danger"
                hx-post="/scorecard/swing/remove" hx-vals=(format!(r#"{{"hole":{hole},"swing":{idx}}}"#))
                hx-target=(PANEL_TARGET) hx-swap="outerHTML" { "Remove" }
        }
    }
}

fn render_hole(idx: usize, hole: &HoleRecord, expanded: bool, clubs: &ClubSet) -> Markup {
    let strokes = hole.strokes();
    let result = classify(strokes, hole.par);
    html! {
        tr id={ "hole-" (idx + 1) } class=(if hole.to_par() > 0 && strokes > 0 { "over" } else { "" }) {
            td { (idx + 1) }
            td {
                form hx-post="/scorecard/par" hx-trigger="change" hx-target=(PANEL_TARGET) hx-swap="outerHTML" {
                    input type="hidden" name="hole" value=(idx);
                    input type="number" name="par" min="3" max="6" value=(hole.par);
                }
            }
            td class="strokes" { (strokes) }
            td class="to-par" { (hole.to_par()) }
            td class="outcome" {
                @if let Some(result) = result {
                    span class={ "result " (result.css_class()) } { (result.label()) }
                }
            }
            td class="hole-actions" {
                (hole_button("/scorecard/toggle", idx, "small", if expanded { "Hide" } else { "Swings" }, false))
                (hole_button("/scorecard/swing/add", idx, "small mute", "+ Swing", false))
                (hole_button("/scorecard/swing/remove-last", idx, "small danger", "−", strokes == 0))
                @if hole.completed {
                    span class="completed-check" title="Completed" { "✓" }
                } @else {
                    (hole_button("/scorecard/complete", idx, "small complete", "Complete", strokes == 0))
                }
            }
        }
        @if expanded {
            tr class="swings-row" {
                td colspan="6" {
                    div class="collapse open" aria-expanded="true" {
                        div class="swings" {
                            @if hole.swings.is_empty() {
                                div class="empty" { "No swings yet. Add one." }
                            }
                            @for (sidx, swing) in hole.swings.iter().enumerate() {
                                (render_swing(idx, sidx, swing, clubs))
                            }
                            div class="swings-actions" {
                                (hole_button("/scorecard/swing/add", idx, "", "Add Swing", false))
                                a class="small mute" href="/clubs" { "Manage Clubs" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_scorecard(store: &RoundStore, clubs: &ClubSet) -> Markup {
    html! {
        div class="scorecard" data-holes=(store.hole_count().count()) {
            table {
                thead {
                    tr {
                        th { "Hole" }
                        th { "Par" }
                        th { "Strokes" }
                        th { "Score" }
                        th { "Outcome" }
                        th {}
                    }
                }
                tbody {
                    @for (idx, hole) in store.round().holes().iter().enumerate() {
                        (render_hole(idx, hole, store.is_expanded(idx), clubs))
                    }
                }
            }
        }
    }
}

fn render_actions() -> Markup {
    html! {
        div class="actions" {
            form class="bulk-pars" hx-post="/scorecard/pars" hx-target=(PANEL_TARGET) hx-swap="outerHTML" {
                label { "Pars: "
                    input name="pars" placeholder="4,4,3,5,4,...";
                }
                button type="submit" { "Apply" }
            }
            button hx-post="/scorecard/reset" hx-confirm="Reset this round?"
                hx-target=(PANEL_TARGET) hx-swap="outerHTML" { "Reset" }
            a class="button" href="/scorecard/export" download="round.json" { "Export JSON" }
            a class="button" href="/history" { "Game History" }
        }
    }
}
