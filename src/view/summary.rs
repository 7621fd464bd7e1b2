use maud::{Markup, html};

use crate::model::score::format_diff;
use crate::model::{Celebration, Round, RoundSummary, classify};

fn diff_class(diff: i32) -> &'static str {
    match diff {
        0 => "even",
        d if d < 0 => "under",
        _ => "over",
    }
}

#[must_use]
pub fn render_summary(round: &Round) -> Markup {
    let summary = RoundSummary::of(round);
    html! {
        div class="scoreboard-summary" {
            div class="scoreboard-header" {
                h3 { "📊 Round Summary" }
                div class="summary-stats" {
                    span class="stat" { strong { (summary.completed_holes) } "/" (summary.holes) " Holes" }
                    span class="stat" { "Total: " strong { (summary.total_strokes) } }
                    span class={ "stat total-diff " (diff_class(summary.diff)) } { (format_diff(summary.diff)) }
                }
            }
            div class="holes-grid" {
                @for (idx, hole) in round.holes().iter().enumerate() {
                    @let strokes = hole.strokes();
                    @let result = classify(strokes, hole.par);
                    @let classes = [
                        "hole-summary",
                        if hole.completed { "completed" } else { "" },
                        if strokes > 0 { "has-strokes" } else { "empty" },
                        result.map_or("", |r| r.css_class()),
                    ];
                    div class=(classes.iter().filter(|c| !c.is_empty()).copied().collect::<Vec<_>>().join(" ")) {
                        div class="hole-number" { (idx + 1) }
                        div class="hole-par" { "Par " (hole.par) }
                        div class="hole-score" {
                            @if strokes > 0 {
                                span class="strokes" { (strokes) }
                                @if hole.completed { span class="completed-check" { "✓" } }
                            } @else {
                                span class="no-score" { "-" }
                            }
                        }
                        @if let Some(r) = result {
                            div class="hole-result" { (r.label()) }
                        }
                    }
                }
            }
            div class="nine-summary" {
                div class="nine-section" id="front-nine" {
                    h4 { "Front 9" }
                    div class="nine-stats" {
                        span { "Par: " (summary.front.par) }
                        span { "Score: " (summary.front.strokes) }
                    }
                }
                @if let Some(back) = &summary.back {
                    div class="nine-section" id="back-nine" {
                        h4 { "Back 9" }
                        div class="nine-stats" {
                            span { "Par: " (back.par) }
                            span { "Score: " (back.strokes) }
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_celebration(celebration: &Celebration) -> Markup {
    html! {
        div class="simple-modal-backdrop" id="celebration" {
            div class="simple-celebration-modal" {
                div class="simple-modal-content" {
                    h2 { "🎉 HOLE " (celebration.hole_number) " COMPLETE! 🎉" }
                    div class="simple-score-display" {
                        div class="simple-score-icon" { (celebration.icon) }
                        div class="simple-score-number" { (celebration.strokes) }
                        div class="simple-score-label" { "STROKES" }
                    }
                    div class={ "simple-result-message " (celebration.result.css_class()) } {
                        (celebration.result.label()) " · " (celebration.message)
                    }
                    div class="simple-score-info" {
                        p { "Par: " (celebration.par) " | Your Score: " (celebration.strokes) }
                        p { "Difference: " (format_diff(celebration.diff)) }
                    }
                    button class="simple-continue-button"
                        hx-post="/scorecard/celebration/dismiss"
                        hx-target="#scorecard-panel" hx-swap="outerHTML" {
                        "Continue Playing"
                    }
                }
            }
        }
    }
}
