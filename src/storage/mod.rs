use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

pub mod keys;
pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(format!("sqlite: {value}"))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(format!("json: {value}"))
    }
}

/// String key-value store holding JSON documents, one per key.
///
/// Implementations use interior mutability so one store can be shared between the
/// round store, the projectors and the web layer.
pub trait KvStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `Err` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `Err` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and decodes the JSON document at `key`. A missing key is `Ok(None)`.
///
/// # Errors
///
/// Returns `Err` if the backend fails or the stored text does not decode as `T`.
pub fn get_json<T>(store: &dyn KvStore, key: &str) -> Result<Option<T>, StorageError>
where
    T: for<'de> Deserialize<'de>,
{
    match store.get(key)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// # Errors
///
/// Returns `Err` if the value cannot be encoded or the backend write fails.
pub fn put_json<T>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string(value)?;
    store.set(key, &payload)
}

/// Like [`get_json`] but treats unreadable or malformed documents as absent.
pub fn get_json_or_default<T>(store: &dyn KvStore, key: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    match get_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("event=kv_read module=storage status=fallback key={key} error={e}");
            T::default()
        }
    }
}
