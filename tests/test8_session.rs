use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use greenway::model::session::{ScorePatch, Session, SessionManager};
use greenway::sync::{SessionCallback, SessionSync, SyncError, SyncHandle};

#[derive(Default)]
struct RecordingSync {
    published: Mutex<Vec<Session>>,
    listener: Mutex<Option<SessionCallback>>,
}

impl RecordingSync {
    fn published(&self) -> Vec<Session> {
        self.published.lock().expect("published lock").clone()
    }

    fn push_remote(&self, session: Session) {
        if let Some(listener) = self.listener.lock().expect("listener lock").as_ref() {
            listener(session);
        }
    }
}

#[async_trait]
impl SessionSync for RecordingSync {
    async fn publish(&self, session: &Session) -> Result<(), SyncError> {
        self.published.lock().expect("published lock").push(session.clone());
        Ok(())
    }

    async fn subscribe(&self, _session_id: &str, on_update: SessionCallback) -> SyncHandle {
        *self.listener.lock().expect("listener lock") = Some(on_update);
        SyncHandle::inert()
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn create_publishes_and_players_are_unique() -> Result<(), Box<dyn std::error::Error>> {
    let sync = Arc::new(RecordingSync::default());
    let mut manager = SessionManager::new(sync.clone());

    let session = manager.create("  ", 9, 1_000).await;
    assert_eq!(session.id.as_deref(), Some("sess_1000"));
    assert_eq!(session.name, "Round");
    settle().await;
    assert_eq!(sync.published().len(), 1);

    assert!(manager.add_player("ann@example.org", "Ann", Some("ann@example.org")));
    assert!(!manager.add_player("ann@example.org", "Ann again", None));
    assert!(manager.add_player("player_2", "Bo", None));

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.players.len(), 2);
    assert_eq!(snapshot.players[0].scores.len(), 9);
    assert_eq!(snapshot.players[0].scores[8].hole, 9);

    assert!(manager.remove_player("player_2"));
    assert!(!manager.remove_player("player_2"));
    Ok(())
}

#[tokio::test]
async fn score_updates_merge_and_publish() -> Result<(), Box<dyn std::error::Error>> {
    let sync = Arc::new(RecordingSync::default());
    let mut manager = SessionManager::new(sync.clone());
    manager.create("Saturday", 18, 2_000).await;
    manager.add_player("p1", "Cy", None);

    assert!(manager.update_player_score(
        "p1",
        2,
        ScorePatch {
            strokes: Some(5),
            swings: None,
        }
    ));
    assert!(!manager.update_player_score("ghost", 2, ScorePatch::default()));
    assert!(!manager.update_player_score("p1", 18, ScorePatch::default()));
    settle().await;

    let published = sync.published();
    assert_eq!(published.len(), 2);
    assert_eq!(published[1].players[0].scores[2].strokes, 5);
    assert_eq!(manager.export(), published[1]);
    Ok(())
}

#[tokio::test]
async fn remote_snapshots_replace_only_the_followed_session() -> Result<(), Box<dyn std::error::Error>> {
    let sync = Arc::new(RecordingSync::default());
    let mut manager = SessionManager::new(sync.clone());
    manager.create("Club night", 9, 3_000).await;

    let mut foreign = manager.snapshot();
    foreign.id = Some("sess_other".to_string());
    foreign.name = "Someone else".to_string();
    sync.push_remote(foreign);
    assert_eq!(manager.snapshot().name, "Club night");

    let mut remote = manager.snapshot();
    remote.name = "Club night (renamed)".to_string();
    sync.push_remote(remote.clone());
    assert_eq!(manager.snapshot(), remote);
    Ok(())
}
