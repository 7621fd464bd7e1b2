//! Local accounts, the signed-in session and per-account round history.
//!
//! Credentials live in the same key-value store as everything else and are only hashed,
//! not salted or stretched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use super::round::Round;
use super::schema::decode_snapshot;
use crate::events::{AppEvent, EventBus};
use crate::storage::keys::{SESSION_KEY, USERS_KEY, rounds_key};
use crate::storage::{KvStore, StorageError, get_json, get_json_or_default, put_json};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoredUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AccountRound {
    pub id: String,
    pub created_at: i64,
    pub holes: usize,
    pub saved_by: String,
    pub data: Round,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Missing fields")]
    MissingFields,
    #[error("User exists")]
    UserExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Sign in first")]
    NotSignedIn,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for AccountError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

fn hash_password(password: &str) -> String {
    sha256::digest(password)
}

pub struct Accounts {
    store: Arc<dyn KvStore>,
    bus: Arc<EventBus>,
    current: Option<UserSummary>,
}

impl Accounts {
    /// Restores the signed-in user from `session`, if any.
    #[must_use]
    pub fn load(store: Arc<dyn KvStore>, bus: Arc<EventBus>) -> Self {
        let current = match get_json::<UserSummary>(store.as_ref(), SESSION_KEY) {
            Ok(current) => current,
            Err(e) => {
                log::warn!("event=session_load module=account status=fallback error={e}");
                None
            }
        };
        Self {
            store,
            bus,
            current,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&UserSummary> {
        self.current.as_ref()
    }

    fn users(&self) -> BTreeMap<String, StoredUser> {
        get_json_or_default(self.store.as_ref(), USERS_KEY)
    }

    fn set_current(&mut self, user: Option<UserSummary>) -> Result<(), AccountError> {
        match &user {
            Some(u) => put_json(self.store.as_ref(), SESSION_KEY, u)?,
            None => self.store.remove(SESSION_KEY)?,
        }
        self.current.clone_from(&user);
        self.bus.publish(AppEvent::AuthChanged(user));
        Ok(())
    }

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// `MissingFields` if any input is blank, `UserExists` if the email is taken.
    pub fn register(
        &mut self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<UserSummary, AccountError> {
        let (email, name) = (email.trim(), name.trim());
        if email.is_empty() || name.is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        let mut users = self.users();
        if users.contains_key(email) {
            return Err(AccountError::UserExists);
        }
        users.insert(
            email.to_string(),
            StoredUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password),
            },
        );
        put_json(self.store.as_ref(), USERS_KEY, &users)?;
        let user = UserSummary {
            name: name.to_string(),
            email: email.to_string(),
        };
        self.set_current(Some(user.clone()))?;
        log::info!("event=account_registered module=account status=ok");
        Ok(user)
    }

    /// # Errors
    ///
    /// `InvalidCredentials` when the email is unknown or the password does not match.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<UserSummary, AccountError> {
        let users = self.users();
        let found = users
            .get(email.trim())
            .filter(|u| u.password_hash == hash_password(password))
            .ok_or(AccountError::InvalidCredentials)?;
        let user = UserSummary {
            name: found.name.clone(),
            email: found.email.clone(),
        };
        self.set_current(Some(user.clone()))?;
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `Err` if the session key cannot be removed.
    pub fn sign_out(&mut self) -> Result<(), AccountError> {
        self.set_current(None)
    }

    /// Renames the account and optionally replaces its password.
    ///
    /// # Errors
    ///
    /// `UserNotFound` if no account has this email.
    pub fn edit_profile(
        &mut self,
        email: &str,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<UserSummary, AccountError> {
        let mut users = self.users();
        let user = users.get_mut(email).ok_or(AccountError::UserNotFound)?;
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            user.name = name.to_string();
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            user.password_hash = hash_password(password);
        }
        let summary = UserSummary {
            name: user.name.clone(),
            email: user.email.clone(),
        };
        put_json(self.store.as_ref(), USERS_KEY, &users)?;
        if self.current.as_ref().is_some_and(|c| c.email == email) {
            self.set_current(Some(summary.clone()))?;
        }
        Ok(summary)
    }

    /// Stores a round snapshot under the signed-in account.
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without a current user, `Storage` if the write fails.
    pub fn save_round(&self, round: &Round, now_millis: i64) -> Result<String, AccountError> {
        let user = self.current.as_ref().ok_or(AccountError::NotSignedIn)?;
        let key = rounds_key(&user.email);
        let mut rounds = self.load_rounds(&user.email);
        let id = format!("round_{now_millis}");
        rounds.insert(
            id.clone(),
            AccountRound {
                id: id.clone(),
                created_at: now_millis,
                holes: round.len(),
                saved_by: user.email.clone(),
                data: round.clone(),
            },
        );
        put_json(self.store.as_ref(), &key, &rounds)?;
        Ok(id)
    }

    /// Rounds saved under `email`, upgraded to the current schema. Undecodable entries are skipped.
    #[must_use]
    pub fn load_rounds(&self, email: &str) -> BTreeMap<String, AccountRound> {
        let stored: BTreeMap<String, serde_json::Value> =
            get_json_or_default(self.store.as_ref(), &rounds_key(email));
        let total = stored.len();
        let rounds: BTreeMap<String, AccountRound> = stored
            .into_iter()
            .filter_map(|(id, entry)| decode_snapshot(entry).map(|round| (id, round)))
            .collect();
        if rounds.len() < total {
            log::warn!(
                "event=account_rounds_load module=account status=partial skipped={}",
                total - rounds.len()
            );
        }
        rounds
    }
}
