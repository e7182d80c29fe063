//! The stored event record.
//!
//! Events come from the backend exactly as stored: times are ISO-8601
//! strings in UTC and are only parsed when a layout needs them, so a single
//! corrupt record can be reported and skipped instead of failing the whole
//! fetch.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{LayoutError, LayoutResult};
use crate::time::parse_utc;

/// Opaque event identifier.
///
/// The backend may hand out numeric or string ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId::new(id)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EventId(s),
            RawId::Number(n) => EventId(n.to_string()),
        })
    }
}

/// A calendar event as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601 UTC instant
    pub start_time: String,
    /// ISO-8601 UTC instant
    pub end_time: String,
}

impl Event {
    pub fn start_utc(&self) -> LayoutResult<DateTime<Utc>> {
        parse_utc("start_time", &self.start_time)
    }

    pub fn end_utc(&self) -> LayoutResult<DateTime<Utc>> {
        parse_utc("end_time", &self.end_time)
    }

    /// Decode one event from raw wire data.
    ///
    /// Time fields are checked before the rest of the shape so that a record
    /// with a bad time reports `Parse` rather than a generic shape error.
    pub fn from_value(value: &Value) -> LayoutResult<Self> {
        let Some(object) = value.as_object() else {
            return Err(LayoutError::InvalidInput(format!(
                "Invalid event object provided: {value}"
            )));
        };

        for field in ["start_time", "end_time"] {
            match object.get(field) {
                Some(Value::String(s)) if !s.is_empty() => {}
                _ => {
                    return Err(LayoutError::Parse(format!(
                        "Invalid or missing {field} string."
                    )));
                }
            }
        }

        serde_json::from_value(value.clone())
            .map_err(|e| LayoutError::InvalidInput(format!("Malformed event: {e}")))
    }
}

/// Decode a collection of events from raw wire data.
///
/// A non-array value is an error; individual malformed entries are logged
/// and skipped.
pub fn decode_events(value: &Value) -> LayoutResult<Vec<Event>> {
    let Some(items) = value.as_array() else {
        return Err(LayoutError::InvalidInput(
            "Event collection must be an array".into(),
        ));
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match Event::from_value(item) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed event");
                None
            }
        })
        .collect())
}
