use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{SessionCallback, SessionSync, SyncError, SyncHandle};
use crate::model::session::Session;

const SESSIONS_PATH: &str = "rest/v1/sessions";

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub url: String,
    pub key: String,
    pub poll_interval: Duration,
}

impl SyncConfig {
    /// Both url and key are required; anything missing disables remote sync.
    #[must_use]
    pub fn from_parts(url: Option<String>, key: Option<String>, poll_secs: u64) -> Option<Self> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        let key = key.filter(|k| !k.trim().is_empty())?;
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            key,
            poll_interval: Duration::from_secs(poll_secs.max(1)),
        })
    }

    fn sessions_url(&self) -> String {
        format!("{}/{SESSIONS_PATH}", self.url)
    }
}

/// REST-backed session table: upsert on publish, polling for subscriptions.
#[derive(Debug, Clone)]
pub struct RemoteSync {
    client: Client,
    config: SyncConfig,
}

impl RemoteSync {
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn fetch(
        client: &Client,
        config: &SyncConfig,
        session_id: &str,
    ) -> Result<Option<Session>, SyncError> {
        let rows: Vec<Session> = client
            .get(format!("{}?id=eq.{session_id}", config.sessions_url()))
            .header("apikey", &config.key)
            .bearer_auth(&config.key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl SessionSync for RemoteSync {
    async fn publish(&self, session: &Session) -> Result<(), SyncError> {
        if session.id.is_none() {
            return Ok(());
        }
        self.client
            .post(self.config.sessions_url())
            .header("apikey", &self.config.key)
            .header("Prefer", "resolution=merge-duplicates")
            .bearer_auth(&self.config.key)
            .json(session)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn subscribe(&self, session_id: &str, on_update: SessionCallback) -> SyncHandle {
        let client = self.client.clone();
        let config = self.config.clone();
        let session_id = session_id.to_string();
        let task = tokio::spawn(async move {
            let mut last_seen: Option<Session> = None;
            let mut ticker = tokio::time::interval(config.poll_interval);
            loop {
                ticker.tick().await;
                match Self::fetch(&client, &config, &session_id).await {
                    Ok(Some(remote)) if last_seen.as_ref() != Some(&remote) => {
                        last_seen = Some(remote.clone());
                        on_update(remote);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("event=session_poll module=sync status=error error={e}");
                    }
                }
            }
        });
        SyncHandle::from_task(task)
    }
}
