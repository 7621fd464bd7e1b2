#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use greenway::events::{AppEvent, EventBus};
use greenway::model::{SwingRecord, Terrain};
use greenway::storage::{KvStore, MemoryStore};

pub struct TestContext {
    pub kv: Arc<dyn KvStore>,
    pub bus: Arc<EventBus>,
    pub events: Arc<Mutex<Vec<AppEvent>>>,
}

impl TestContext {
    /// Keys carried by every `DataUpdated` seen so far.
    pub fn data_updates(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("event log lock")
            .iter()
            .filter_map(|e| match e {
                AppEvent::DataUpdated { key } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&self) {
        self.events.lock().expect("event log lock").clear();
    }
}

/// Memory-backed store plus a bus whose first subscriber records every event.
pub fn setup_test_context() -> TestContext {
    with_store(Arc::new(MemoryStore::new()))
}

pub fn with_store(kv: Arc<dyn KvStore>) -> TestContext {
    let bus = Arc::new(EventBus::new());
    let events = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&events);
    bus.subscribe(move |event| {
        log.lock().expect("event log lock").push(event.clone());
    });
    TestContext { kv, bus, events }
}

pub fn swing(club: &str, terrain: Terrain, satisfaction: u8) -> SwingRecord {
    SwingRecord {
        club: club.to_string(),
        terrain,
        satisfaction,
        notes: String::new(),
    }
}
