// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatches push-channel envelopes to store mutations.
//!
//! Routing rules:
//! - notification: upsert into notices by `hash`
//! - configUpdated: shallow-merge into the named config section
//! - showUpdated / showAdded: upsert into shows
//! - addManualSearchResult: upsert each result into its provider's cache;
//!   rejected results share one fallback notice
//! - QueueItemUpdate: upsert into search-queue items
//! - QueueItemShowAdd: upsert into show-queue items
//! - anything else, or any payload that fails to apply: fallback notice
//!
//! Routing never fails. Redelivered envelopes are harmless because every
//! handler is an upsert.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::merge::EntityKind;
use crate::protocol::{Envelope, Event, Notice};
use crate::store::{into_entity, EntityStore, Upsert};

/// Tag used for frames that are not JSON envelopes at all.
pub const UNPARSED_TAG: &str = "<unparsed>";

/// The result of routing one envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    /// A handler ran; one outcome per entity it touched.
    Applied { tag: String, outcomes: Vec<Upsert> },
    /// Nothing could handle the envelope; a fallback notice was raised.
    Fallback { tag: String, notice: Notice },
}

impl Routed {
    pub fn tag(&self) -> &str {
        match self {
            Routed::Applied { tag, .. } | Routed::Fallback { tag, .. } => tag,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Routed::Fallback { .. })
    }
}

/// Parses one text frame and routes it.
pub fn route_frame(store: &mut EntityStore, frame: &str) -> Routed {
    match Envelope::from_json(frame) {
        Ok(envelope) => route(store, envelope),
        Err(e) => {
            warn!("unparseable push frame: {}", e);
            fallback(
                store,
                UNPARSED_TAG,
                &Value::String(frame.to_string()),
                Some(&e.to_string()),
            )
        }
    }
}

/// Routes a decoded envelope to its handler.
pub fn route(store: &mut EntityStore, envelope: Envelope) -> Routed {
    let tag = envelope.event.clone();
    let data = envelope.data.clone();

    let applied = Event::from_envelope(envelope).and_then(|event| dispatch(store, event));
    match applied {
        Ok(routed) => {
            debug!("routed '{}'", routed.tag());
            routed
        }
        Err(e) => {
            warn!("rejected '{}' payload: {}", tag, e);
            fallback(store, &tag, &data, Some(&e.to_string()))
        }
    }
}

fn dispatch(store: &mut EntityStore, event: Event) -> Result<Routed> {
    let tag = event.tag().to_string();
    let outcomes = match event {
        Event::Notification(notice) => {
            info!("[{}] {}: {}", notice.kind, notice.title, notice.body);
            vec![store.upsert(EntityKind::Notice, notice.to_entity()?)?]
        }
        Event::ConfigUpdated { section, config } => vec![store.merge_config(&section, config)],
        Event::ShowUpdated(show) | Event::ShowAdded(show) => {
            vec![store.upsert(EntityKind::Show, show)?]
        }
        Event::ManualSearchResults(results) => {
            return Ok(apply_search_results(store, &tag, results));
        }
        Event::QueueItemUpdate(item) => vec![store.upsert(EntityKind::QueueItem, item)?],
        Event::QueueItemShowAdd(item) => vec![store.upsert(EntityKind::ShowQueueItem, item)?],
        Event::Unknown { tag, data } => return Ok(fallback(store, &tag, &data, None)),
    };
    Ok(Routed::Applied { tag, outcomes })
}

/// Upserts each result on its own. Rejected results are gathered into one
/// fallback notice; the batch counts as applied if any result landed.
fn apply_search_results(store: &mut EntityStore, tag: &str, results: Vec<Value>) -> Routed {
    let mut outcomes = Vec::with_capacity(results.len());
    let mut rejected = Vec::new();
    let mut reasons = Vec::new();

    for result in results {
        let applied = into_entity(EntityKind::CacheResult, result.clone())
            .and_then(|entity| store.upsert(EntityKind::CacheResult, entity));
        match applied {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                warn!("rejected '{}' result: {}", tag, e);
                reasons.push(e.to_string());
                rejected.push(result);
            }
        }
    }

    if rejected.is_empty() {
        return Routed::Applied {
            tag: tag.to_string(),
            outcomes,
        };
    }

    let reason = reasons.join("; ");
    let routed = fallback(store, tag, &Value::Array(rejected), Some(&reason));
    if outcomes.is_empty() {
        routed
    } else {
        Routed::Applied {
            tag: tag.to_string(),
            outcomes,
        }
    }
}

/// Raises a generic notice showing the raw tag and payload.
fn fallback(store: &mut EntityStore, tag: &str, data: &Value, reason: Option<&str>) -> Routed {
    let notice = Notice::fallback(tag, data, reason);
    info!("{}: {}", notice.title, notice.body);

    match notice.to_entity() {
        Ok(entity) => {
            if let Err(e) = store.upsert(EntityKind::Notice, entity) {
                warn!("could not record fallback notice: {}", e);
            }
        }
        Err(e) => warn!("could not encode fallback notice: {}", e),
    }

    Routed::Fallback {
        tag: tag.to_string(),
        notice,
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
