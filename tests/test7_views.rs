mod common;

use std::sync::Arc;

use greenway::model::{ClubSet, HoleCount, SwingUpdate};
use greenway::projector::{HeatmapView, project};
use greenway::store::RoundStore;
use greenway::view::heatmap::render_heatmap;
use greenway::view::scorecard::{Panel, render_panel, render_scorecard};
use scraper::{Html, Selector};

use common::setup_test_context;

fn select(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid selector")
}

#[test]
fn scorecard_rows_and_outcomes() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    for _ in 0..5 {
        store.add_swing(0);
    }
    store.add_swing(1);
    store.add_swing(1);
    store.update_swing(1, 0, SwingUpdate::Club("1I".into()));

    let html = Html::parse_fragment(&render_scorecard(&store, &ClubSet::default()).into_string());

    assert_eq!(html.select(&select("tbody tr[id^=hole-]")).count(), 9);
    let first = html.select(&select("tr#hole-1")).next().ok_or("row 1 missing")?;
    assert_eq!(first.value().attr("class"), Some("over"));
    let outcome: String = first.select(&select("span.result.bogey")).flat_map(|e| e.text()).collect();
    assert_eq!(outcome, "Bogey");

    let second = html.select(&select("tr#hole-2 span.result")).next().ok_or("row 2 result missing")?;
    assert_eq!(second.value().attr("class"), Some("result eagle"));

    // Hole 2 was expanded by its swings; a club no longer in the set still shows as selected.
    let selected: Vec<String> = html
        .select(&select("form.swing-field select[name=value] option[selected]"))
        .map(|o| o.text().collect())
        .collect();
    assert!(selected.contains(&"1I".to_string()));
    assert!(html.select(&select("tr#hole-3 span.result")).next().is_none());
    Ok(())
}

#[test]
fn heatmap_placeholder_and_cells() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Eighteen, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));

    let empty = render_heatmap(&project(store.round(), HeatmapView::All), HeatmapView::All);
    let html = Html::parse_fragment(&empty.into_string());
    assert_eq!(html.select(&select(".heatmap-empty")).count(), 1);
    assert_eq!(html.select(&select(".heatcell")).count(), 0);

    store.add_swing(10);
    store.update_swing(10, 0, SwingUpdate::Satisfaction(1));
    let back = render_heatmap(&project(store.round(), HeatmapView::Back), HeatmapView::Back);
    let html = Html::parse_fragment(&back.into_string());
    let cells: Vec<_> = html.select(&select(".heatcell")).collect();
    assert_eq!(cells.len(), 9);
    assert_eq!(cells[0].value().attr("data-hole"), Some("10"));
    assert_eq!(cells[1].value().attr("class"), Some("heatcell feel-1"));
    assert_eq!(cells[0].value().attr("class"), Some("heatcell no-data"));
    assert_eq!(html.select(&select(".swing-dot.feel-1")).count(), 1);
    Ok(())
}

#[test]
fn panel_shows_celebration_after_completing() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.add_swing(4);
    store.add_swing(4);
    store.add_swing(4);
    store.add_swing(4);
    store.complete_hole(4);

    let clubs = ClubSet::default();
    let panel = Panel {
        store: &store,
        projection: project(store.round(), HeatmapView::All),
        view: HeatmapView::All,
        clubs: &clubs,
        show_heatmap: false,
        scroll_to: None,
    };
    let html = Html::parse_fragment(&render_panel(&panel).into_string());

    assert!(html.select(&select(".heatmap")).next().is_none());
    let message: String = html
        .select(&select("#celebration .simple-result-message.par"))
        .flat_map(|e| e.text())
        .collect();
    assert_eq!(message, "Par · SOLID PAR!");
    assert_eq!(html.select(&select("tr#hole-5 .completed-check")).count(), 1);
    Ok(())
}
