//! Client-side events state.
//!
//! Holds the normalized event set fetched from a backend together with the
//! status of the last request. Every operation moves `status` to `Loading`,
//! then to `Succeeded` or `Failed` with the error message kept for display.

use calgrid_core::{Event, EventId};
use tracing::error;

use crate::backend::{BackendResult, EventBackend, EventPatch, NewEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct EventsState {
    events: Vec<Event>,
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl EventsState {
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Events in the order they were fetched or created.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn set_pending(&mut self) {
        self.status = LoadStatus::Loading;
        self.error = None;
    }

    fn set_succeeded(&mut self) {
        self.status = LoadStatus::Succeeded;
        self.error = None;
    }

    fn set_failed(&mut self, message: String) {
        self.status = LoadStatus::Failed;
        self.error = Some(message);
    }

    /// Replace the whole set. Later duplicates of an id win.
    fn replace_all(&mut self, events: Vec<Event>) {
        self.events.clear();
        for event in events {
            self.upsert(event);
        }
    }

    fn upsert(&mut self, event: Event) {
        match self.events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    fn remove(&mut self, id: &EventId) {
        self.events.retain(|event| &event.id != id);
    }
}

/// Runs backend operations and folds their results into [`EventsState`].
pub struct EventsController<B> {
    backend: B,
    state: EventsState,
}

impl<B: EventBackend> EventsController<B> {
    pub fn new(backend: B) -> Self {
        EventsController {
            backend,
            state: EventsState::default(),
        }
    }

    pub fn state(&self) -> &EventsState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn fetch_events(&mut self) -> BackendResult<()> {
        self.state.set_pending();
        let result = self.backend.fetch_all().await;
        self.settle(result).map(|events| self.state.replace_all(events))
    }

    pub async fn create_event(&mut self, event: NewEvent) -> BackendResult<Event> {
        self.state.set_pending();
        let result = self.backend.create(event).await;
        let created = self.settle(result)?;
        self.state.upsert(created.clone());
        Ok(created)
    }

    pub async fn update_event(&mut self, id: &EventId, patch: EventPatch) -> BackendResult<Event> {
        self.state.set_pending();
        let result = self.backend.update(id, patch).await;
        let updated = self.settle(result)?;
        self.state.upsert(updated.clone());
        Ok(updated)
    }

    pub async fn delete_event(&mut self, id: &EventId) -> BackendResult<()> {
        self.state.set_pending();
        let result = self.backend.delete(id).await;
        self.settle(result)?;
        self.state.remove(id);
        Ok(())
    }

    fn settle<T>(&mut self, result: BackendResult<T>) -> BackendResult<T> {
        match &result {
            Ok(_) => self.state.set_succeeded(),
            Err(e) => {
                error!(error = %e, "Event request failed");
                self.state.set_failed(e.to_string());
            }
        }
        result
    }
}
