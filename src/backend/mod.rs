//! Remote event storage.
//!
//! The grid only needs four operations from wherever events live: fetch
//! everything, create, partially update by id, and delete by id. Each returns
//! the stored record (or nothing, for delete) or a [`BackendError`].

mod memory;
mod rest;

pub use memory::MemoryBackend;
pub use rest::RestBackend;

use std::future::Future;

use calgrid_core::{Event, EventId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by an event backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Fields for a new event; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

/// Partial update; only `Some` fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }

    /// Apply this patch to a stored event.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(start_time) = &self.start_time {
            event.start_time = start_time.clone();
        }
        if let Some(end_time) = &self.end_time {
            event.end_time = end_time.clone();
        }
    }
}

/// CRUD over the events resource.
pub trait EventBackend {
    fn fetch_all(&self) -> impl Future<Output = BackendResult<Vec<Event>>> + Send;

    fn create(&self, event: NewEvent) -> impl Future<Output = BackendResult<Event>> + Send;

    fn update(
        &self,
        id: &EventId,
        patch: EventPatch,
    ) -> impl Future<Output = BackendResult<Event>> + Send;

    fn delete(&self, id: &EventId) -> impl Future<Output = BackendResult<()>> + Send;
}

/// Check that a record can be stored: non-empty title, parsable times, end
/// after start.
pub(crate) fn validate_record(event: &Event) -> BackendResult<()> {
    if event.title.trim().is_empty() {
        return Err(BackendError::Validation("title must not be empty".into()));
    }

    let start = event
        .start_utc()
        .map_err(|e| BackendError::Validation(e.to_string()))?;
    let end = event
        .end_utc()
        .map_err(|e| BackendError::Validation(e.to_string()))?;

    if end <= start {
        return Err(BackendError::Validation(format!(
            "end_time {} must be after start_time {}",
            event.end_time, event.start_time
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event() -> Event {
        Event {
            id: EventId::new("1"),
            title: "Review".into(),
            description: None,
            start_time: "2024-06-10T09:00:00Z".into(),
            end_time: "2024-06-10T10:00:00Z".into(),
        }
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut event = make_test_event();
        let patch = EventPatch {
            title: Some("Retro".into()),
            end_time: Some("2024-06-10T11:00:00Z".into()),
            ..EventPatch::default()
        };
        patch.apply_to(&mut event);

        assert_eq!(event.title, "Retro");
        assert_eq!(event.start_time, "2024-06-10T09:00:00Z");
        assert_eq!(event.end_time, "2024-06-10T11:00:00Z");
        assert!(!patch.is_empty());
        assert!(EventPatch::default().is_empty());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = EventPatch {
            title: Some("Retro".into()),
            ..EventPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"title": "Retro"})
        );
    }

    #[test]
    fn test_validate_record() {
        assert!(validate_record(&make_test_event()).is_ok());

        let mut untitled = make_test_event();
        untitled.title = "  ".into();
        assert!(matches!(validate_record(&untitled), Err(BackendError::Validation(_))));

        let mut backwards = make_test_event();
        backwards.end_time = "2024-06-10T08:00:00Z".into();
        assert!(matches!(validate_record(&backwards), Err(BackendError::Validation(_))));

        let mut garbled = make_test_event();
        garbled.start_time = "soon".into();
        assert!(matches!(validate_record(&garbled), Err(BackendError::Validation(_))));
    }
}
