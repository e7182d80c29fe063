//! Calendar grid application layer.
//!
//! Wraps the `calgrid-core` layout engine with the pieces a calendar screen
//! needs around it: an event backend, the client-side events state, form
//! validation, date navigation, and configuration.

pub mod backend;
pub mod config;
pub mod events;
pub mod form;
pub mod logging;
pub mod navigation;
pub mod view;

pub use backend::{
    BackendError, BackendResult, EventBackend, EventPatch, MemoryBackend, NewEvent, RestBackend,
};
pub use config::{AppConfig, BackendConfig};
pub use events::{EventsController, EventsState, LoadStatus};
pub use form::{EventForm, FormError, TimeInput};
pub use logging::init_tracing;
pub use navigation::CalendarNavigation;
pub use view::{CalendarScreen, render_calendar};
