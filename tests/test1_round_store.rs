mod common;

use std::sync::Arc;

use greenway::model::{HoleCount, ResultLabel, Round, SwingRecord, SwingUpdate, Terrain, parse_round};
use greenway::projector::{FeelBand, HeatmapProjection, HeatmapProjector, HeatmapView};
use greenway::storage::KvStore;
use greenway::store::RoundStore;

use common::setup_test_context;

fn stored_round(ctx: &common::TestContext, key: &str) -> Option<Round> {
    ctx.kv
        .get(key)
        .expect("memory store read")
        .and_then(|text| parse_round(&text))
}

#[test]
fn fresh_round_is_all_defaults_and_not_written() {
    let ctx = setup_test_context();
    let store = RoundStore::load(HoleCount::Eighteen, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));

    assert_eq!(store.round().len(), 18);
    assert!(store.round().holes().iter().all(|h| h.par == 4 && h.swings.is_empty() && !h.completed));
    assert_eq!(store.key(), "scores:18");
    assert!(stored_round(&ctx, "scores:18").is_none());
    assert!(ctx.data_updates().is_empty());
}

#[test]
fn add_and_remove_last_swing_persist_and_broadcast() {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Eighteen, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));

    store.add_swing(0);
    assert_eq!(store.round().holes()[0].swings, vec![SwingRecord::default()]);
    assert_eq!(store.round().holes()[0].swings[0].club, "7I");
    assert!(store.is_expanded(0));
    assert_eq!(stored_round(&ctx, "scores:18").as_ref(), Some(store.round()));
    assert_eq!(ctx.data_updates(), vec!["scores:18".to_string()]);

    store.remove_last_swing(0);
    assert_eq!(store.round().holes()[0].strokes(), 0);
    assert_eq!(ctx.data_updates().len(), 2);

    // Nothing left to remove: no write, no event.
    store.remove_last_swing(0);
    assert_eq!(ctx.data_updates().len(), 2);
}

#[test]
fn out_of_range_indices_change_nothing() {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    let before = store.round().clone();

    store.set_par(9, 5);
    store.add_swing(42);
    store.update_swing(0, 0, SwingUpdate::Club("Driver".into()));
    store.remove_swing(3, 1);
    assert!(store.complete_hole(9).is_none());

    assert_eq!(store.round(), &before);
    assert!(ctx.data_updates().is_empty());
    assert!(stored_round(&ctx, "scores:9").is_none());
}

#[test]
fn update_and_remove_specific_swings() {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.add_swing(2);
    store.add_swing(2);
    store.update_swing(2, 0, SwingUpdate::Club("Driver".into()));
    store.update_swing(2, 0, SwingUpdate::Terrain(Terrain::Rough));
    store.update_swing(2, 1, SwingUpdate::Satisfaction(5));
    store.update_swing(2, 1, SwingUpdate::Notes("pured it".into()));

    let swings = &store.round().holes()[2].swings;
    assert_eq!(swings[0].club, "Driver");
    assert_eq!(swings[0].terrain, Terrain::Rough);
    assert_eq!(swings[1].satisfaction, 5);
    assert_eq!(swings[1].notes, "pured it");

    store.remove_swing(2, 0);
    let swings = &store.round().holes()[2].swings;
    assert_eq!(swings.len(), 1);
    assert_eq!(swings[0].notes, "pured it");
}

#[test]
fn complete_hole_needs_swings_and_repeats_persist() {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Eighteen, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));

    assert!(store.complete_hole(4).is_none());
    assert!(!store.round().holes()[4].completed);

    for _ in 0..3 {
        store.add_swing(4);
    }
    let celebration = store.complete_hole(4).expect("hole has swings");
    assert_eq!(celebration.result, ResultLabel::Birdie);
    assert_eq!(celebration.hole_number, 5);
    assert_eq!(celebration.message, "GREAT BIRDIE!");
    assert!(store.round().holes()[4].completed);

    let writes = ctx.data_updates().len();
    let again = store.complete_hole(4).expect("still has swings");
    assert_eq!(again.result, ResultLabel::Birdie);
    assert!(store.round().holes()[4].completed);
    assert_eq!(ctx.data_updates().len(), writes + 1);

    // Removing swings never revokes completion.
    store.remove_last_swing(4);
    assert!(store.round().holes()[4].completed);
    assert_eq!(store.summary().completed_holes, 1);
}

#[test]
fn resize_keeps_by_index_and_drops_truncated_holes() {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Eighteen, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.add_swing(0);
    store.set_par(0, 5);
    store.add_swing(12);

    store.resize_to(HoleCount::Nine);
    assert_eq!(store.round().len(), 9);
    assert_eq!(store.key(), "scores:9");
    assert_eq!(store.round().holes()[0].par, 5);
    assert_eq!(stored_round(&ctx, "scores:9").map(|r| r.len()), Some(9));

    store.resize_to(HoleCount::Eighteen);
    assert_eq!(store.round().len(), 18);
    assert_eq!(store.round().holes()[0].strokes(), 1);
    assert!(store.round().holes()[12].swings.is_empty());
    assert_eq!(ctx.data_updates().last().map(String::as_str), Some("scores:18"));
}

#[test]
fn bulk_pars_skip_tokens_without_digits() {
    let mut round = Round::with_holes(4);
    round.hole_mut(2).expect("hole 3").par = 3;
    round.apply_bulk_pars("4,4,x,5");
    let pars: Vec<i32> = round.holes().iter().map(|h| h.par).collect();
    assert_eq!(pars, vec![4, 4, 3, 5]);

    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.apply_bulk_pars("3 5;4,,p5,3,4,4,5,3,4,4");
    let pars: Vec<i32> = store.round().holes().iter().map(|h| h.par).collect();
    assert_eq!(pars, vec![3, 5, 4, 5, 3, 4, 4, 5, 3]);

    let writes = ctx.data_updates().len();
    store.apply_bulk_pars("x, y");
    assert_eq!(ctx.data_updates().len(), writes);
}

#[test]
fn reset_replaces_every_hole() {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.add_swing(1);
    store.complete_hole(1);
    store.reset_round();

    assert_eq!(store.round(), &Round::with_holes(9));
    assert!(store.celebration().is_none());
    assert_eq!(stored_round(&ctx, "scores:9"), Some(Round::with_holes(9)));
}

#[test]
fn reload_reads_what_was_written() {
    let ctx = setup_test_context();
    let mut first = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    first.add_swing(3);
    first.update_swing(3, 0, SwingUpdate::Club("PW".into()));
    let written = first.round().clone();
    drop(first);

    let second = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    assert_eq!(second.round(), &written);
}

#[test]
fn heatmap_follows_round_store_through_the_bus() {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    let projector = HeatmapProjector::mount(
        HoleCount::Nine,
        HeatmapView::All,
        Arc::clone(&ctx.kv),
        Arc::clone(&ctx.bus),
    );
    assert_eq!(projector.projection(), HeatmapProjection::Empty);

    store.add_swing(2);
    store.update_swing(2, 0, SwingUpdate::Satisfaction(5));

    let HeatmapProjection::Cells(cells) = projector.projection() else {
        panic!("expected cells after a swing was recorded");
    };
    assert_eq!(cells.len(), 9);
    assert_eq!(cells[2].band, FeelBand::Feel5);
    assert_eq!(cells[0].band, FeelBand::NoData);

    projector.select(6);
    assert!(store.is_expanded(6));
    assert_eq!(store.take_scroll_target(), Some(6));

    drop(projector);
    assert_eq!(ctx.bus.subscriber_count(), 2);
}
