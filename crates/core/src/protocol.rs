// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Push-channel wire format.
//!
//! Every text frame on the push channel is one JSON envelope:
//!
//! ```json
//! { "event": "showUpdated", "data": { "slug": "tvdb301824", "title": "..." } }
//! ```
//!
//! The `event` tag selects both the handler and the expected `data` shape.
//! Tags outside [`EventTag`] are kept as [`Event::Unknown`] rather than
//! rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::merge::EntityKind;
use crate::store::{into_entity, Entity};

/// Raw `{ event, data }` wrapper around every push message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Envelope {
            event: event.into(),
            data,
        }
    }

    /// Serializes the envelope to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the envelope from JSON.
    pub fn from_json(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// The server-defined tags this client handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    Notification,
    ConfigUpdated,
    ShowUpdated,
    ShowAdded,
    AddManualSearchResult,
    QueueItemUpdate,
    QueueItemShowAdd,
}

impl EventTag {
    pub const ALL: [EventTag; 7] = [
        EventTag::Notification,
        EventTag::ConfigUpdated,
        EventTag::ShowUpdated,
        EventTag::ShowAdded,
        EventTag::AddManualSearchResult,
        EventTag::QueueItemUpdate,
        EventTag::QueueItemShowAdd,
    ];

    /// The tag as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            EventTag::Notification => "notification",
            EventTag::ConfigUpdated => "configUpdated",
            EventTag::ShowUpdated => "showUpdated",
            EventTag::ShowAdded => "showAdded",
            EventTag::AddManualSearchResult => "addManualSearchResult",
            EventTag::QueueItemUpdate => "QueueItemUpdate",
            EventTag::QueueItemShowAdd => "QueueItemShowAdd",
        }
    }

    /// Matches a wire tag exactly (tags are case-sensitive).
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

/// A user-visible notice, de-duplicated by `hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub hash: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Notice {
    /// A notice for an envelope nothing else could handle.
    ///
    /// The hash is derived from the tag and payload, so redelivering the same
    /// envelope lands on the same notice.
    pub fn fallback(tag: &str, data: &Value, reason: Option<&str>) -> Self {
        let payload = data.to_string();
        let mut hasher = Sha256::new();
        hasher.update(tag.as_bytes());
        hasher.update([0u8]);
        hasher.update(payload.as_bytes());
        let hash = hex::encode(hasher.finalize());

        let title = match reason {
            Some(reason) => format!("Could not handle '{tag}': {reason}"),
            None => format!("Unhandled event '{tag}'"),
        };

        Notice {
            hash,
            kind: "notice".to_string(),
            title,
            body: payload,
        }
    }

    pub fn to_entity(&self) -> Result<Entity> {
        into_entity(EntityKind::Notice, serde_json::to_value(self)?)
    }
}

/// A decoded push message.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Notification(Notice),
    ConfigUpdated { section: String, config: Entity },
    ShowUpdated(Entity),
    ShowAdded(Entity),
    /// One or more search results; each names its provider. Results are
    /// checked one by one when applied so a bad entry cannot sink the batch.
    ManualSearchResults(Vec<Value>),
    QueueItemUpdate(Entity),
    QueueItemShowAdd(Entity),
    Unknown { tag: String, data: Value },
}

#[derive(Deserialize)]
struct ConfigUpdatedData {
    section: String,
    #[serde(default)]
    config: Entity,
}

impl Event {
    /// Decodes an envelope's payload according to its tag.
    ///
    /// Unknown tags succeed as [`Event::Unknown`]; a known tag with the wrong
    /// payload shape is an error.
    pub fn from_envelope(envelope: Envelope) -> Result<Event> {
        let Envelope { event, data } = envelope;
        let Some(tag) = EventTag::parse(&event) else {
            return Ok(Event::Unknown { tag: event, data });
        };

        let malformed = |reason: String| Error::MalformedPayload {
            tag: tag.as_str().to_string(),
            reason,
        };

        let decoded = match tag {
            EventTag::Notification => Event::Notification(
                serde_json::from_value(data).map_err(|e| malformed(e.to_string()))?,
            ),
            EventTag::ConfigUpdated => {
                let ConfigUpdatedData { section, config } =
                    serde_json::from_value(data).map_err(|e| malformed(e.to_string()))?;
                Event::ConfigUpdated { section, config }
            }
            EventTag::ShowUpdated => Event::ShowUpdated(into_entity(EntityKind::Show, data)?),
            EventTag::ShowAdded => Event::ShowAdded(into_entity(EntityKind::Show, data)?),
            EventTag::AddManualSearchResult => {
                let results = match data {
                    Value::Array(values) => values,
                    single => vec![single],
                };
                Event::ManualSearchResults(results)
            }
            EventTag::QueueItemUpdate => {
                Event::QueueItemUpdate(into_entity(EntityKind::QueueItem, data)?)
            }
            EventTag::QueueItemShowAdd => {
                Event::QueueItemShowAdd(into_entity(EntityKind::ShowQueueItem, data)?)
            }
        };
        Ok(decoded)
    }

    /// The wire tag this event arrived under.
    pub fn tag(&self) -> &str {
        match self {
            Event::Notification(_) => EventTag::Notification.as_str(),
            Event::ConfigUpdated { .. } => EventTag::ConfigUpdated.as_str(),
            Event::ShowUpdated(_) => EventTag::ShowUpdated.as_str(),
            Event::ShowAdded(_) => EventTag::ShowAdded.as_str(),
            Event::ManualSearchResults(_) => EventTag::AddManualSearchResult.as_str(),
            Event::QueueItemUpdate(_) => EventTag::QueueItemUpdate.as_str(),
            Event::QueueItemShowAdd(_) => EventTag::QueueItemShowAdd.as_str(),
            Event::Unknown { tag, .. } => tag,
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
