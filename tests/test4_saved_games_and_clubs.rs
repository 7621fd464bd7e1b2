mod common;

use std::sync::Arc;

use chrono::{Local, TimeZone};
use greenway::model::saved_games::MAX_SAVED_GAMES;
use greenway::model::{ClubSet, HoleCount, Round, SavedGames, SwingUpdate};
use greenway::storage::KvStore;
use greenway::store::RoundStore;
use serde_json::json;

use common::setup_test_context;

#[test]
fn sixth_save_evicts_the_oldest() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut games = SavedGames::load(ctx.kv.as_ref());
    let now = Local
        .with_ymd_and_hms(2026, 5, 1, 9, 30, 0)
        .single()
        .ok_or("ambiguous local time")?;

    let mut ids = Vec::new();
    for n in 1..=6 {
        let id = games
            .save(ctx.kv.as_ref(), &format!("Game {n}"), &Round::with_holes(9), now)?
            .ok_or("name was rejected")?;
        ids.push(id);
    }

    assert_eq!(games.len(), MAX_SAVED_GAMES);
    assert!(games.get(ids[0]).is_none());
    assert_eq!(games.games()[0].name, "Game 2");
    assert_eq!(games.games()[4].name, "Game 6");
    // Same timestamp for every save, ids still unique and increasing.
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(games.games()[0].date, "2026-05-01");
    assert_eq!(games.games()[0].time, "09:30");

    let reloaded = SavedGames::load(ctx.kv.as_ref());
    assert_eq!(reloaded, games);
    Ok(())
}

#[test]
fn blank_names_are_rejected_and_long_names_clipped() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut games = SavedGames::load(ctx.kv.as_ref());
    assert_eq!(games.save(ctx.kv.as_ref(), "   ", &Round::with_holes(9), Local::now())?, None);

    let long = "x".repeat(45);
    let id = games
        .save(ctx.kv.as_ref(), &long, &Round::with_holes(9), Local::now())?
        .ok_or("name was rejected")?;
    assert_eq!(games.get(id).map(|g| g.name.chars().count()), Some(30));
    Ok(())
}

#[test]
fn delete_and_load_into_round_store() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.add_swing(0);
    store.add_swing(0);
    store.complete_hole(0);

    let mut games = SavedGames::load(ctx.kv.as_ref());
    let id = games
        .save(ctx.kv.as_ref(), "Sunday", store.round(), Local::now())?
        .ok_or("name was rejected")?;
    let saved = games.get(id).ok_or("missing game")?.clone();
    assert_eq!(saved.total_strokes, 2);
    assert_eq!(saved.completed_holes, 1);
    assert_eq!(saved.total_par, 36);

    store.reset_round();
    store.replace_round(saved.data.clone());
    assert_eq!(store.round(), &saved.data);

    assert!(games.delete(ctx.kv.as_ref(), id)?);
    assert!(!games.delete(ctx.kv.as_ref(), id)?);
    assert!(SavedGames::load(ctx.kv.as_ref()).is_empty());
    Ok(())
}

#[test]
fn clubs_trim_dedupe_and_leave_swings_alone() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let mut clubs = ClubSet::load(ctx.kv.as_ref());
    assert_eq!(clubs.len(), 9);
    assert!(clubs.add("  4H "));
    assert!(!clubs.add("4H"));
    assert!(!clubs.add("   "));
    clubs.save(ctx.kv.as_ref())?;

    let mut store = RoundStore::load(HoleCount::Nine, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    store.add_swing(0);
    store.update_swing(0, 0, SwingUpdate::Club("4H".into()));

    assert!(clubs.remove("4H"));
    clubs.save(ctx.kv.as_ref())?;

    assert_eq!(store.round().holes()[0].swings[0].club, "4H");
    let reloaded = ClubSet::load(ctx.kv.as_ref());
    assert!(!reloaded.contains("4H"));
    assert_eq!(reloaded.names().last().map(String::as_str), Some("Putter"));
    Ok(())
}

#[test]
fn legacy_and_broken_entries_do_not_wipe_history() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = setup_test_context();
    let good = json!({
        "id": 1, "name": "Good", "date": "2026-04-01", "time": "08:00",
        "data": [{"par": 4, "swings": [], "completed": false}],
        "total_strokes": 0, "total_par": 4, "completed_holes": 0
    });
    let legacy = json!({
        "id": 2, "name": "Old format", "date": "2026-04-02", "time": "08:00",
        "data": [{"par": 5, "strokes": 3}],
        "total_strokes": 3, "total_par": 5, "completed_holes": 0
    });
    let broken = json!({"id": "three", "name": 7});
    ctx.kv.set("saved-games", &json!([good, legacy, broken]).to_string())?;

    let mut games = SavedGames::load(ctx.kv.as_ref());
    assert_eq!(games.len(), 2);
    let upgraded = games.get(2).ok_or("legacy game dropped")?;
    assert_eq!(upgraded.data.holes()[0].par, 5);
    assert_eq!(upgraded.data.holes()[0].strokes(), 3);

    games.save(ctx.kv.as_ref(), "New", &Round::with_holes(9), Local::now())?;
    let reloaded = SavedGames::load(ctx.kv.as_ref());
    let names: Vec<&str> = reloaded.games().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Good", "Old format", "New"]);
    Ok(())
}
