//! Optional remote mirror of the multiplayer session.
//!
//! Everything here is best-effort: failures are logged and never reach the caller.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::model::session::Session;

pub mod remote;

pub use remote::{RemoteSync, SyncConfig};

#[derive(Error, Debug, Clone)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(String),
    #[error("remote sync is not configured")]
    NotConfigured,
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

pub type SessionCallback = Box<dyn Fn(Session) + Send + Sync>;

/// Keeps a remote subscription alive; dropping it stops the subscription.
#[derive(Debug, Default)]
pub struct SyncHandle {
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    #[must_use]
    pub fn inert() -> Self {
        Self { task: None }
    }

    #[must_use]
    pub fn from_task(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[async_trait]
pub trait SessionSync: Send + Sync {
    /// Upserts the full snapshot keyed by session id.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the backend is unreachable or rejects the write.
    async fn publish(&self, session: &Session) -> Result<(), SyncError>;

    /// Invokes `on_update` with every new remote snapshot of `session_id`.
    async fn subscribe(&self, session_id: &str, on_update: SessionCallback) -> SyncHandle;
}

/// Used when no remote backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSync;

#[async_trait]
impl SessionSync for NoopSync {
    async fn publish(&self, _session: &Session) -> Result<(), SyncError> {
        Ok(())
    }

    async fn subscribe(&self, _session_id: &str, _on_update: SessionCallback) -> SyncHandle {
        SyncHandle::inert()
    }
}

/// Picks the remote backend when configured, otherwise [`NoopSync`].
#[must_use]
pub fn from_config(config: Option<SyncConfig>) -> Arc<dyn SessionSync> {
    match config {
        Some(config) => Arc::new(RemoteSync::new(config)),
        None => Arc::new(NoopSync),
    }
}

/// Publishes without waiting; the outcome is only logged.
pub fn publish_detached(sync: Arc<dyn SessionSync>, session: Session) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        log::debug!("event=session_publish module=sync status=skipped reason=no_runtime");
        return;
    };
    runtime.spawn(async move {
        if let Err(e) = sync.publish(&session).await {
            log::warn!("event=session_publish module=sync status=error error={e}");
        }
    });
}
