use maud::{Markup, html};

use crate::projector::{HeatCell, HeatmapProjection, HeatmapView};

fn render_cell(cell: &HeatCell) -> Markup {
    let title = match cell.average {
        Some(avg) => format!("Avg feel {avg:.2}"),
        None => "No swings".to_string(),
    };
    html! {
        div class={ "heatcell " (cell.band.css_class()) } title=(title)
            data-hole=(cell.hole_number())
            hx-post="/heatmap/select" hx-vals=(format!(r#"{{"hole":{}}}"#, cell.hole_index))
            hx-target="#scorecard-panel" hx-swap="outerHTML" {
            div class="cell-inner" {
                div class="hole-number" { (cell.hole_number()) }
                @if !cell.dots.is_empty() {
                    div class="cell-swings" aria-hidden="true" {
                        @for dot in &cell.dots {
                            div class={ "swing-dot " (dot.band.css_class()) }
                                title=(format!("{} • {} • feel {}", dot.club, dot.terrain, dot.satisfaction)) {}
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_heatmap(projection: &HeatmapProjection, view: HeatmapView) -> Markup {
    html! {
        div class="heatmap" data-view=(view.as_str()) {
            @match projection {
                HeatmapProjection::Empty => {
                    div class="heatmap-empty" aria-hidden="true" {}
                }
                HeatmapProjection::Cells(cells) => {
                    div class="heatmap-grid" {
                        @for cell in cells {
                            (render_cell(cell))
                        }
                    }
                }
            }
        }
    }
}
