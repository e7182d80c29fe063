//! In-process event backend.

use calgrid_core::{Event, EventId};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{BackendError, BackendResult, EventBackend, EventPatch, NewEvent, validate_record};

/// Keeps events in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    events: RwLock<Vec<Event>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records, stored as given.
    pub fn with_events(events: Vec<Event>) -> Self {
        MemoryBackend {
            events: RwLock::new(events),
        }
    }
}

impl EventBackend for MemoryBackend {
    async fn fetch_all(&self) -> BackendResult<Vec<Event>> {
        Ok(self.events.read().await.clone())
    }

    async fn create(&self, event: NewEvent) -> BackendResult<Event> {
        let event = Event {
            id: EventId::new(Uuid::new_v4().to_string()),
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            end_time: event.end_time,
        };
        validate_record(&event)?;

        debug!(event_id = %event.id, "Creating event");
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: &EventId, patch: EventPatch) -> BackendResult<Event> {
        let mut events = self.events.write().await;
        let slot = events
            .iter_mut()
            .find(|event| &event.id == id)
            .ok_or_else(|| BackendError::NotFound(id.clone()))?;

        let mut updated = slot.clone();
        patch.apply_to(&mut updated);
        validate_record(&updated)?;

        debug!(event_id = %id, "Updating event");
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &EventId) -> BackendResult<()> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|event| &event.id != id);
        debug!(event_id = %id, removed = before - events.len(), "Deleting event");
        Ok(())
    }
}
