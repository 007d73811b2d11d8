//! HTTP client for the remote task backend.
//!
//! Endpoints (relative to the configured base URL):
//! - `POST /pipeline/start` with `{ "topic": ... }`
//! - `GET /pipeline/status/{task_id}`

use crate::backend::base::{BackendError, RemoteStatus, TaskBackend, TaskTicket};
use crate::backend::schema::{StatusPayload, SubmitPayload};
use async_trait::async_trait;
use aura_protocol::config_models::BackendSettings;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

/// [`TaskBackend`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTaskBackend {
    client: Client,
    base_url: String,
}

impl HttpTaskBackend {
    /// Create a client for the backend described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Transport` if the HTTP client cannot be built.
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TaskBackend for HttpTaskBackend {
    async fn submit(&self, topic: &str) -> Result<TaskTicket, BackendError> {
        let url = format!("{}/pipeline/start", self.base_url);
        tracing::debug!(%url, "Submitting pipeline task");

        let response = self
            .client
            .post(&url)
            .json(&json!({ "topic": topic }))
            .send()
            .await
            .map_err(transport_error)?;

        let payload: SubmitPayload = read_json(response).await?;
        payload.validate()
    }

    async fn status(&self, task_id: &str) -> Result<RemoteStatus, BackendError> {
        let url = format!("{}/pipeline/status/{}", self.base_url, task_id);
        tracing::debug!(%url, "Fetching pipeline status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let payload: StatusPayload = read_json(response).await?;
        payload.validate()
    }
}

fn transport_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Transport(format!("request timed out: {e}"))
    } else {
        BackendError::Transport(e.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(BackendError::Http {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| BackendError::Schema(e.to_string()))
}
