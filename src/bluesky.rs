use crate::config::BlueskyConfig;
use crate::errors::NotifyError;
use crate::notify::{Notification, Notifier};
use chrono::{SecondsFormat, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::info;

const POST_COLLECTION: &str = "app.bsky.feed.post";

pub struct BlueskyPoster {
    cfg: BlueskyConfig,
    client: Client,
}

#[derive(Serialize)]
struct CreateSessionRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_jwt: String,
    pub did: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatedRecord {
    pub uri: String,
}

impl BlueskyPoster {
    pub fn new(cfg: BlueskyConfig, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;
        Ok(Self { cfg, client })
    }

    fn xrpc_url(&self, method: &str) -> String {
        format!("{}/xrpc/{method}", self.cfg.service)
    }

    pub fn create_session(&self, handle: &str, password: &str) -> Result<Session, NotifyError> {
        let resp = self
            .client
            .post(self.xrpc_url("com.atproto.server.createSession"))
            .json(&CreateSessionRequest {
                identifier: handle,
                password,
            })
            .send()
            .map_err(|e| NotifyError::RequestFailed(format!("createSession: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(NotifyError::ApiError(format!(
                "createSession: {} - {}",
                status, text
            )));
        }

        resp.json::<Session>()
            .map_err(|e| NotifyError::ApiError(format!("createSession response: {e}")))
    }

    pub fn create_post(&self, session: &Session, text: &str) -> Result<CreatedRecord, NotifyError> {
        let body = json!({
            "repo": session.did,
            "collection": POST_COLLECTION,
            "record": {
                "$type": POST_COLLECTION,
                "text": text,
                "createdAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
            }
        });

        let resp = self
            .client
            .post(self.xrpc_url("com.atproto.repo.createRecord"))
            .bearer_auth(&session.access_jwt)
            .json(&body)
            .send()
            .map_err(|e| NotifyError::RequestFailed(format!("createRecord: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(NotifyError::ApiError(format!(
                "createRecord: {} - {}",
                status, text
            )));
        }

        resp.json::<CreatedRecord>()
            .map_err(|e| NotifyError::ApiError(format!("createRecord response: {e}")))
    }
}

impl Notifier for BlueskyPoster {
    fn name(&self) -> &'static str {
        "bluesky"
    }

    fn describe(&self) -> String {
        format!(
            "post to Bluesky as {} via {}",
            self.cfg.handle.as_deref().unwrap_or("<no handle>"),
            self.cfg.service
        )
    }

    fn preview(&self, notification: &Notification) -> String {
        format!("Post:\n{}", notification.short_text)
    }

    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let (handle, password) = self
            .cfg
            .credentials()
            .ok_or(NotifyError::MissingCredential("BLUESKY_HANDLE/BLUESKY_PASSWORD"))?;

        let session = self.create_session(handle, password)?;
        let record = self.create_post(&session, &notification.short_text)?;
        info!("🦋 Posted to Bluesky: {}", record.uri);
        Ok(())
    }
}
