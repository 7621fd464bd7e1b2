mod common;

use std::sync::Arc;

use greenway::model::{HoleCount, SwingRecord, Terrain, load_round};
use greenway::storage::KvStore;
use greenway::store::RoundStore;
use serde_json::json;

use common::setup_test_context;

#[test]
fn legacy_strokes_become_default_swings() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let stored = json!([
        {"par": 5, "strokes": 3},
        {"par": 3, "swings": [{"club": "PW", "terrain": "Green", "satisfaction": 4, "notes": ""}], "completed": true},
        "garbage",
        {"par": 4.0}
    ]);
    ctx.kv.set("scores:9", &stored.to_string())?;

    let round = load_round(ctx.kv.as_ref(), 9);
    assert_eq!(round.len(), 9);

    let legacy = &round.holes()[0];
    assert_eq!(legacy.par, 5);
    assert_eq!(legacy.swings, vec![SwingRecord::default(); 3]);
    assert!(!legacy.completed);

    let current = &round.holes()[1];
    assert_eq!(current.par, 3);
    assert!(current.completed);
    assert_eq!(current.swings[0], common::swing("PW", Terrain::Green, 4));

    assert_eq!(round.holes()[2].par, 4);
    assert!(round.holes()[2].swings.is_empty());
    assert_eq!(round.holes()[3].par, 4);
    assert!(round.holes()[8].swings.is_empty());
    Ok(())
}

#[test]
fn absurd_legacy_stroke_counts_load_as_plain_holes() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    ctx.kv.set(
        "scores:9",
        r#"[{"par":4,"strokes":100000000000000000},{"par":3,"strokes":2}]"#,
    )?;

    let round = load_round(ctx.kv.as_ref(), 9);
    assert_eq!(round.len(), 9);
    assert_eq!(round.holes()[0].par, 4);
    assert!(round.holes()[0].swings.is_empty());
    assert_eq!(round.holes()[1].swings.len(), 2);
    Ok(())
}

#[test]
fn non_array_documents_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    ctx.kv.set("scores:18", r#"{"holes": 18}"#)?;
    let round = load_round(ctx.kv.as_ref(), 18);
    assert_eq!(round.len(), 18);
    assert_eq!(round.total_strokes(), 0);

    ctx.kv.set("scores:18", "not json at all")?;
    assert_eq!(load_round(ctx.kv.as_ref(), 18).total_par(), 72);
    Ok(())
}

#[test]
fn longer_documents_are_truncated_to_the_hole_count() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let holes: Vec<_> = (0..18).map(|i| json!({"par": 3 + (i % 3), "swings": []})).collect();
    ctx.kv.set("scores:9", &serde_json::Value::from(holes).to_string())?;

    let round = load_round(ctx.kv.as_ref(), 9);
    assert_eq!(round.len(), 9);
    let pars: Vec<i32> = round.holes().iter().map(|h| h.par).collect();
    assert_eq!(pars, vec![3, 4, 5, 3, 4, 5, 3, 4, 5]);
    Ok(())
}

#[test]
fn first_write_after_load_stores_the_upgraded_shape() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    ctx.kv.set("scores:9", &json!([{"par": 4, "strokes": 2}]).to_string())?;

    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.set_par(0, 5);

    let text = ctx.kv.get("scores:9")?.ok_or("round was not written")?;
    let written: serde_json::Value = serde_json::from_str(&text)?;
    let first = &written[0];
    assert_eq!(first["par"], json!(5));
    assert_eq!(first["swings"].as_array().map(Vec::len), Some(2));
    assert_eq!(first["swings"][0]["club"], json!("7I"));
    assert_eq!(first["swings"][0]["terrain"], json!("Fairway"));
    assert!(first.get("strokes").is_none());
    assert_eq!(written.as_array().map(Vec::len), Some(9));
    Ok(())
}
