//! Multiplayer session shared through the optional remote backend.
//!
//! Local state is always what the UI shows; remote snapshots for the same session id
//! simply replace it.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::round::SwingRecord;
use crate::sync::{SessionSync, SyncHandle, publish_detached};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerHoleScore {
    pub hole: usize,
    pub strokes: u32,
    #[serde(default)]
    pub swings: Vec<SwingRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub scores: Vec<PlayerHoleScore>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: Option<String>,
    pub name: String,
    pub holes: usize,
    pub players: Vec<Player>,
    pub created_at: Option<i64>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            holes: 18,
            players: Vec::new(),
            created_at: None,
        }
    }
}

/// Partial update applied to one player's hole score.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScorePatch {
    pub strokes: Option<u32>,
    pub swings: Option<Vec<SwingRecord>>,
}

pub struct SessionManager {
    session: Arc<Mutex<Session>>,
    sync: Arc<dyn SessionSync>,
    subscription: Option<SyncHandle>,
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionManager {
    #[must_use]
    pub fn new(sync: Arc<dyn SessionSync>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            sync,
            subscription: None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        lock(&self.session).clone()
    }

    /// Starts a new session, publishes it and follows remote changes to it.
    pub async fn create(&mut self, name: &str, holes: usize, now_millis: i64) -> Session {
        let name = if name.trim().is_empty() {
            "Round"
        } else {
            name.trim()
        };
        let session = Session {
            id: Some(format!("sess_{now_millis}")),
            name: name.to_string(),
            holes,
            players: Vec::new(),
            created_at: Some(now_millis),
        };
        *lock(&self.session) = session.clone();
        publish_detached(Arc::clone(&self.sync), session.clone());
        self.follow_remote().await;
        session
    }

    async fn follow_remote(&mut self) {
        // Dropping the previous handle stops its subscription.
        self.subscription = None;
        let Some(id) = lock(&self.session).id.clone() else {
            return;
        };
        let shared = Arc::clone(&self.session);
        let followed = id.clone();
        let handle = self
            .sync
            .subscribe(
                &id,
                Box::new(move |remote: Session| {
                    if remote.id.as_deref() != Some(followed.as_str()) {
                        return;
                    }
                    *lock(&shared) = remote;
                }),
            )
            .await;
        self.subscription = Some(handle);
    }

    /// Adds a player with an empty score line. Returns `false` if the id is already present.
    pub fn add_player(&self, id: &str, name: &str, email: Option<&str>) -> bool {
        let mut session = lock(&self.session);
        if session.players.iter().any(|p| p.id == id) {
            return false;
        }
        let scores = (1..=session.holes)
            .map(|hole| PlayerHoleScore {
                hole,
                strokes: 0,
                swings: Vec::new(),
            })
            .collect();
        session.players.push(Player {
            id: id.to_string(),
            name: name.to_string(),
            email: email.map(ToString::to_string),
            scores,
        });
        true
    }

    pub fn remove_player(&self, id: &str) -> bool {
        let mut session = lock(&self.session);
        let before = session.players.len();
        session.players.retain(|p| p.id != id);
        session.players.len() != before
    }

    /// Merges `patch` into one hole of one player and publishes the new snapshot.
    pub fn update_player_score(&self, player_id: &str, hole_index: usize, patch: ScorePatch) -> bool {
        let next = {
            let mut session = lock(&self.session);
            let Some(score) = session
                .players
                .iter_mut()
                .find(|p| p.id == player_id)
                .and_then(|p| p.scores.get_mut(hole_index))
            else {
                return false;
            };
            if let Some(strokes) = patch.strokes {
                score.strokes = strokes;
            }
            if let Some(swings) = patch.swings {
                score.swings = swings;
            }
            session.clone()
        };
        publish_detached(Arc::clone(&self.sync), next);
        true
    }

    #[must_use]
    pub fn export(&self) -> Session {
        self.snapshot()
    }
}
