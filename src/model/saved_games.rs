use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::round::Round;
use super::schema::decode_snapshot;
use crate::storage::keys::SAVED_GAMES_KEY;
use crate::storage::{KvStore, StorageError, get_json, put_json};

pub const MAX_SAVED_GAMES: usize = 5;
pub const MAX_GAME_NAME_CHARS: usize = 30;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SavedGame {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub data: Round,
    pub total_strokes: usize,
    pub total_par: i32,
    pub completed_holes: usize,
}

/// Named snapshots of whole games, oldest first, capped at [`MAX_SAVED_GAMES`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct SavedGames {
    games: Vec<SavedGame>,
}

impl SavedGames {
    /// Reads `saved-games`, upgrading each snapshot's round.
    ///
    /// Entries that cannot be decoded are skipped; a document that is not a list reads as empty.
    #[must_use]
    pub fn load(store: &dyn KvStore) -> Self {
        let entries = match get_json::<Vec<serde_json::Value>>(store, SAVED_GAMES_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                log::warn!("event=saved_games_load module=saved_games status=fallback error={e}");
                return Self::default();
            }
        };
        let stored = entries.len();
        let games: Vec<SavedGame> = entries.into_iter().filter_map(decode_snapshot::<SavedGame>).collect();
        if games.len() < stored {
            log::warn!(
                "event=saved_games_load module=saved_games status=partial skipped={}",
                stored - games.len()
            );
        }
        Self { games }
    }

    fn persist(&self, store: &dyn KvStore) -> Result<(), StorageError> {
        put_json(store, SAVED_GAMES_KEY, self)
    }

    #[must_use]
    pub fn games(&self) -> &[SavedGame] {
        &self.games
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&SavedGame> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Saves a snapshot of `round` under `name`, evicting the oldest game past the cap.
    ///
    /// Returns `Ok(None)` when the trimmed name is empty.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list cannot be persisted.
    pub fn save(
        &mut self,
        store: &dyn KvStore,
        name: &str,
        round: &Round,
        now: DateTime<Local>,
    ) -> Result<Option<i64>, StorageError> {
        let name: String = name.trim().chars().take(MAX_GAME_NAME_CHARS).collect();
        if name.is_empty() {
            return Ok(None);
        }
        let newest = self.games.iter().map(|g| g.id).max().unwrap_or(i64::MIN);
        let id = now.timestamp_millis().max(newest.saturating_add(1));
        self.games.push(SavedGame {
            id,
            name,
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
            data: round.clone(),
            total_strokes: round.total_strokes(),
            total_par: round.total_par(),
            completed_holes: round.completed_holes(),
        });
        if self.games.len() > MAX_SAVED_GAMES {
            let overflow = self.games.len() - MAX_SAVED_GAMES;
            self.games.drain(..overflow);
        }
        self.persist(store)?;
        log::info!("event=game_saved module=saved_games status=ok id={id}");
        Ok(Some(id))
    }

    /// # Errors
    ///
    /// Returns `Err` if the list cannot be persisted.
    pub fn delete(&mut self, store: &dyn KvStore, id: i64) -> Result<bool, StorageError> {
        let before = self.games.len();
        self.games.retain(|g| g.id != id);
        if self.games.len() == before {
            return Ok(false);
        }
        self.persist(store)?;
        Ok(true)
    }
}
