mod common;

use std::sync::Arc;

use greenway::model::{HoleCount, SwingUpdate, Terrain};
use greenway::storage::{KvStore, SqliteStore};
use greenway::store::RoundStore;

#[test]
fn kv_round_trip_and_overwrite() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open_in_memory()?;
    assert_eq!(store.get("clubs")?, None);

    store.set("clubs", r#"["Driver"]"#)?;
    store.set("clubs", r#"["Driver","PW"]"#)?;
    store.set("scores:9", "[]")?;
    assert_eq!(store.get("clubs")?.as_deref(), Some(r#"["Driver","PW"]"#));
    assert_eq!(store.keys()?, vec!["clubs".to_string(), "scores:9".to_string()]);

    store.remove("clubs")?;
    store.remove("never-written")?;
    assert_eq!(store.keys()?, vec!["scores:9".to_string()]);
    Ok(())
}

#[test]
fn rounds_survive_reopening_the_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("greenway.db");

    let written = {
        let kv: Arc<dyn KvStore> = Arc::new(SqliteStore::open(&path)?);
        let ctx = common::with_store(kv);
        let mut store = RoundStore::load(HoleCount::Eighteen, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
        store.add_swing(17);
        store.update_swing(17, 0, SwingUpdate::Terrain(Terrain::Bunker));
        store.set_par(17, 5);
        store.round().clone()
    };

    let kv: Arc<dyn KvStore> = Arc::new(SqliteStore::open(&path)?);
    let ctx = common::with_store(kv);
    let reopened = RoundStore::load(HoleCount::Eighteen, Arc::clone(&ctx.kv), Arc::clone(&ctx.bus));
    assert_eq!(reopened.round(), &written);
    assert_eq!(reopened.round().holes()[17].swings[0].terrain, Terrain::Bunker);
    Ok(())
}
