//! HTTP backend for a PostgREST-style `events` table.
//!
//! Requests go to `{url}/rest/v1/events`. Rows are filtered with
//! `id=eq.{id}` and writes ask for `Prefer: return=representation` so the
//! stored record comes back in the response body.

use calgrid_core::event::decode_events;
use calgrid_core::{Event, EventId};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::{BackendError, BackendResult, EventBackend, EventPatch, NewEvent};
use crate::config::BackendConfig;

const EVENTS_PATH: &str = "rest/v1/events";

#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        RestBackend {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.url, &config.api_key)
    }

    fn events_url(&self) -> String {
        format!("{}/{EVENTS_PATH}", self.base_url.trim_end_matches('/'))
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.events_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn by_id(&self, method: Method, id: &EventId) -> RequestBuilder {
        self.request(method).query(&[("id", format!("eq.{id}"))])
    }

    async fn send(request: RequestBuilder) -> BackendResult<Response> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, body = %body, "Backend request failed");
        Err(status_error(status, body))
    }

    async fn body(request: RequestBuilder) -> BackendResult<Value> {
        Self::send(request)
            .await?
            .json::<Value>()
            .await
            .map_err(transport)
    }

    /// Decode a JSON array of rows. Malformed rows are skipped.
    async fn rows(request: RequestBuilder) -> BackendResult<Vec<Event>> {
        let body = Self::body(request).await?;
        decode_events(&body).map_err(|e| BackendError::Transport(e.to_string()))
    }

    /// First row of a `return=representation` write, `None` if no row came
    /// back. A row that does not decode is a transport error.
    async fn first_row(request: RequestBuilder) -> BackendResult<Option<Event>> {
        let body = Self::body(request).await?;
        let Some(rows) = body.as_array() else {
            return Err(BackendError::Transport(format!(
                "Expected an array of rows, got: {body}"
            )));
        };

        rows.first()
            .map(|row| {
                Event::from_value(row)
                    .map_err(|e| BackendError::Transport(format!("Malformed row returned: {e}")))
            })
            .transpose()
    }
}

impl EventBackend for RestBackend {
    async fn fetch_all(&self) -> BackendResult<Vec<Event>> {
        let events = Self::rows(self.request(Method::GET).query(&[("select", "*")])).await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    async fn create(&self, event: NewEvent) -> BackendResult<Event> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&event);

        Self::first_row(request)
            .await?
            .ok_or_else(|| BackendError::Transport("Create returned no rows".into()))
    }

    async fn update(&self, id: &EventId, patch: EventPatch) -> BackendResult<Event> {
        let request = self
            .by_id(Method::PATCH, id)
            .header("Prefer", "return=representation")
            .json(&patch);

        Self::first_row(request)
            .await?
            .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &EventId) -> BackendResult<()> {
        Self::send(self.by_id(Method::DELETE, id)).await?;
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

fn status_error(status: StatusCode, body: String) -> BackendError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            BackendError::Validation(body)
        }
        _ => BackendError::Transport(format!("{status}: {body}")),
    }
}
