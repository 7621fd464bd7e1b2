mod common;

use std::sync::Arc;

use greenway::model::{HoleCount, Round, Terrain};
use greenway::projector::{
    FeelBand, HeatmapProjection, HeatmapProjector, HeatmapView, MAX_SWINGS_PER_CELL, project,
};
use greenway::storage::put_json;

use common::{setup_test_context, swing};

fn round_with(holes: usize, hole: usize, feels: &[u8]) -> Round {
    let mut round = Round::with_holes(holes);
    if let Some(record) = round.hole_mut(hole) {
        record.swings = feels.iter().map(|f| swing("7I", Terrain::Fairway, *f)).collect();
    }
    round
}

fn cells(projection: HeatmapProjection) -> Vec<greenway::projector::HeatCell> {
    match projection {
        HeatmapProjection::Cells(cells) => cells,
        HeatmapProjection::Empty => panic!("expected a populated heatmap"),
    }
}

#[test]
fn no_swings_in_view_is_empty() {
    let round = round_with(18, 12, &[4]);
    assert_eq!(project(&round, HeatmapView::Front), HeatmapProjection::Empty);
    assert_eq!(project(&Round::with_holes(9), HeatmapView::All), HeatmapProjection::Empty);

    let back = cells(project(&round, HeatmapView::Back));
    assert_eq!(back.len(), 9);
    assert_eq!(back[0].hole_number(), 10);
    assert_eq!(back[3].band, FeelBand::Feel4);
}

#[test]
fn nine_hole_rounds_ignore_front_and_back() {
    let round = round_with(9, 8, &[2]);
    let all = cells(project(&round, HeatmapView::Back));
    assert_eq!(all.len(), 9);
    assert_eq!(all[8].band, FeelBand::Feel2);
}

#[test]
fn averages_only_the_first_twelve_swings() {
    let mut feels = vec![1; MAX_SWINGS_PER_CELL];
    feels.extend([5; 6]);
    let round = round_with(9, 0, &feels);

    let cell = &cells(project(&round, HeatmapView::All))[0];
    assert_eq!(cell.dots.len(), MAX_SWINGS_PER_CELL);
    assert_eq!(cell.average, Some(1.0));
    assert_eq!(cell.band, FeelBand::Feel1);
}

#[test]
fn dots_carry_their_own_band() {
    let round = round_with(9, 1, &[1, 3, 5]);
    let cell = &cells(project(&round, HeatmapView::All))[1];
    let bands: Vec<&str> = cell.dots.iter().map(|d| d.band.css_class()).collect();
    assert_eq!(bands, vec!["feel-1", "feel-3", "feel-5"]);
    assert_eq!(cell.band.css_class(), "feel-3");
}

#[test]
fn projector_rereads_on_any_data_update() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut projector = HeatmapProjector::mount(
        HoleCount::Eighteen,
        HeatmapView::All,
        Arc::clone(&ctx.kv),
        Arc::clone(&ctx.bus),
    );
    assert_eq!(projector.projection(), HeatmapProjection::Empty);

    // Written behind the projector's back; only the broadcast makes it visible.
    put_json(ctx.kv.as_ref(), "scores:18", &round_with(18, 10, &[5, 5]))?;
    assert_eq!(projector.projection(), HeatmapProjection::Empty);
    ctx.bus.publish(greenway::AppEvent::DataUpdated {
        key: "clubs".to_string(),
    });
    assert_eq!(cells(projector.projection())[10].band, FeelBand::Feel5);

    projector.set_view(HeatmapView::Front);
    assert_eq!(projector.projection(), HeatmapProjection::Empty);

    projector.set_holes(HoleCount::Nine);
    assert_eq!(projector.holes(), 9);
    Ok(())
}
