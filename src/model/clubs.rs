use serde::{Deserialize, Serialize};

use crate::storage::keys::CLUBS_KEY;
use crate::storage::{KvStore, StorageError, get_json, put_json};

pub const DEFAULT_CLUBS: [&str; 9] = [
    "Driver", "3W", "5W", "3I", "5I", "7I", "PW", "SW", "Putter",
];

/// Ordered, duplicate-free club names offered when editing a swing.
///
/// Removing a club does not touch swings that already reference it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct ClubSet {
    clubs: Vec<String>,
}

impl Default for ClubSet {
    fn default() -> Self {
        Self {
            clubs: DEFAULT_CLUBS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ClubSet {
    /// Reads `clubs`, falling back to the defaults when absent or malformed.
    #[must_use]
    pub fn load(store: &dyn KvStore) -> Self {
        match get_json::<Vec<String>>(store, CLUBS_KEY) {
            Ok(Some(names)) => {
                let mut set = Self { clubs: Vec::new() };
                for name in names {
                    set.add(&name);
                }
                set
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("event=clubs_load module=clubs status=fallback error={e}");
                Self::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `Err` if the store cannot be written.
    pub fn save(&self, store: &dyn KvStore) -> Result<(), StorageError> {
        put_json(store, CLUBS_KEY, &self.clubs)
    }

    /// Adds a trimmed name. Returns `false` for empty names and duplicates.
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.clubs.push(trimmed.to_string());
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.clubs.len();
        self.clubs.retain(|c| c != name);
        self.clubs.len() != before
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.clubs.iter().any(|c| c == name)
    }

    #[must_use]
    pub fn is_default(name: &str) -> bool {
        DEFAULT_CLUBS.contains(&name)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.clubs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn add_trims_and_rejects_duplicates() {
        let mut clubs = ClubSet::default();
        assert!(clubs.add("  Hybrid "));
        assert!(!clubs.add("Hybrid"));
        assert!(!clubs.add("   "));
        assert_eq!(clubs.names().last().map(String::as_str), Some("Hybrid"));
        assert_eq!(clubs.len(), 10);
    }

    #[test]
    fn defaults_can_be_removed_and_persist() {
        let store = MemoryStore::new();
        let mut clubs = ClubSet::load(&store);
        assert!(clubs.remove("Driver"));
        clubs.save(&store).unwrap();

        let reloaded = ClubSet::load(&store);
        assert!(!reloaded.contains("Driver"));
        assert!(ClubSet::is_default("Driver"));
    }

    #[test]
    fn malformed_document_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(CLUBS_KEY, "{not json").unwrap();
        assert_eq!(ClubSet::load(&store), ClubSet::default());
    }
}
