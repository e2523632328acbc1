// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory mirror of server entities.
//!
//! The store is the only writer of its collections. Callers go through
//! [`EntityStore::upsert`] and friends; reads hand out shared references.
//! One store is constructed per session and passed by reference to whatever
//! consumes the push channel or hydration results.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::merge::{scalar_key, EntityKind, MergeStrategy, Placement};
use crate::protocol::Notice;
use crate::quality::{Qualities, QualityVocabulary};

/// A mirrored record: a JSON object as received from the server.
pub type Entity = serde_json::Map<String, Value>;

/// What an upsert did to its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// No element had this key; the partial became a new element.
    Inserted,
    /// An existing element changed.
    Updated,
    /// An existing element already held these values.
    Unchanged,
}

/// Converts a JSON value into an entity of the given kind.
pub fn into_entity(kind: EntityKind, value: Value) -> Result<Entity> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::NotAnObject {
            kind,
            found: json_type_name(&other).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Upserts `partial` into `items` according to `strategy`.
fn upsert_into(
    strategy: &MergeStrategy,
    items: &mut Vec<Entity>,
    partial: Entity,
) -> Result<Upsert> {
    let key = (strategy.key)(&partial).ok_or(Error::MissingKey {
        kind: strategy.kind,
        field: strategy.key_field,
    })?;

    let position = items
        .iter()
        .position(|e| (strategy.key)(e).as_deref() == Some(key.as_str()));

    match position {
        Some(index) => {
            let existing = &mut items[index];
            let before = existing.clone();
            (strategy.merge)(existing, partial);
            if *existing == before {
                Ok(Upsert::Unchanged)
            } else {
                Ok(Upsert::Updated)
            }
        }
        None => {
            match strategy.placement {
                Placement::Append => items.push(partial),
                Placement::Prepend => items.insert(0, partial),
            }
            Ok(Upsert::Inserted)
        }
    }
}

/// An ordered, keyed collection of one entity kind.
#[derive(Debug, Clone)]
struct Collection {
    strategy: &'static MergeStrategy,
    items: Vec<Entity>,
}

impl Collection {
    fn new(kind: EntityKind) -> Self {
        Collection {
            strategy: kind.strategy(),
            items: Vec::new(),
        }
    }

    fn upsert(&mut self, partial: Entity) -> Result<Upsert> {
        upsert_into(self.strategy, &mut self.items, partial)
    }

    fn get(&self, key: &str) -> Option<&Entity> {
        self.items
            .iter()
            .find(|e| (self.strategy.key)(e).as_deref() == Some(key))
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        let strategy = self.strategy;
        self.items
            .iter_mut()
            .find(|e| (strategy.key)(e).as_deref() == Some(key))
    }
}

/// The session's mirror of server state.
#[derive(Debug, Clone)]
pub struct EntityStore {
    shows: Collection,
    providers: Collection,
    queue_items: Collection,
    show_queue_items: Collection,
    notices: Collection,
    config: BTreeMap<String, Entity>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        EntityStore {
            shows: Collection::new(EntityKind::Show),
            providers: Collection::new(EntityKind::Provider),
            queue_items: Collection::new(EntityKind::QueueItem),
            show_queue_items: Collection::new(EntityKind::ShowQueueItem),
            notices: Collection::new(EntityKind::Notice),
            config: BTreeMap::new(),
        }
    }

    fn collection(&self, kind: EntityKind) -> Option<&Collection> {
        match kind {
            EntityKind::Show => Some(&self.shows),
            EntityKind::Provider => Some(&self.providers),
            EntityKind::QueueItem => Some(&self.queue_items),
            EntityKind::ShowQueueItem => Some(&self.show_queue_items),
            EntityKind::Notice => Some(&self.notices),
            EntityKind::CacheResult => None,
        }
    }

    /// Inserts or merges `partial` into the collection for `kind`.
    ///
    /// Cache results are routed to their provider through the payload's
    /// `provider` field (an id, or an object carrying one).
    pub fn upsert(&mut self, kind: EntityKind, partial: Entity) -> Result<Upsert> {
        match kind {
            EntityKind::Show => self.shows.upsert(partial),
            EntityKind::Provider => self.providers.upsert(partial),
            EntityKind::QueueItem => self.queue_items.upsert(partial),
            EntityKind::ShowQueueItem => self.show_queue_items.upsert(partial),
            EntityKind::Notice => self.notices.upsert(partial),
            EntityKind::CacheResult => {
                let provider_id = partial
                    .get("provider")
                    .and_then(|p| p.get("id").and_then(scalar_key).or_else(|| scalar_key(p)))
                    .ok_or(Error::MissingKey {
                        kind,
                        field: "provider",
                    })?;
                self.upsert_cache_result(&provider_id, partial)
            }
        }
    }

    /// Upserts a result into a provider's `cache`, creating a placeholder
    /// provider if none is mirrored yet.
    pub fn upsert_cache_result(&mut self, provider_id: &str, partial: Entity) -> Result<Upsert> {
        let strategy = EntityKind::CacheResult.strategy();
        if (strategy.key)(&partial).is_none() {
            return Err(Error::MissingKey {
                kind: EntityKind::CacheResult,
                field: strategy.key_field,
            });
        }

        if self.providers.get(provider_id).is_none() {
            let placeholder = into_entity(
                EntityKind::Provider,
                json!({ "id": provider_id, "name": "", "config": {}, "cache": [] }),
            )?;
            self.providers.upsert(placeholder)?;
        }

        let provider = self.providers.get_mut(provider_id).ok_or(Error::MissingKey {
            kind: EntityKind::Provider,
            field: "id",
        })?;

        let mut cache: Vec<Entity> = match provider.remove("cache") {
            Some(Value::Array(values)) => values
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let outcome = upsert_into(strategy, &mut cache, partial);
        provider.insert(
            "cache".to_string(),
            Value::Array(cache.into_iter().map(Value::Object).collect()),
        );
        outcome
    }

    /// Shallow-merges `partial` into a named config section.
    pub fn merge_config(&mut self, section: &str, partial: Entity) -> Upsert {
        match self.config.get_mut(section) {
            Some(existing) => {
                let before = existing.clone();
                crate::merge::shallow_merge(existing, partial);
                if *existing == before {
                    Upsert::Unchanged
                } else {
                    Upsert::Updated
                }
            }
            None => {
                self.config.insert(section.to_string(), partial);
                Upsert::Inserted
            }
        }
    }

    /// Looks up an entity by natural key. Cache results are reached through
    /// [`EntityStore::cache`].
    pub fn get(&self, kind: EntityKind, key: &str) -> Option<&Entity> {
        self.collection(kind).and_then(|c| c.get(key))
    }

    /// All entities of a kind, in collection order.
    pub fn list(&self, kind: EntityKind) -> &[Entity] {
        self.collection(kind)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.list(kind).len()
    }

    /// Cached search results for a provider, in arrival order.
    pub fn cache(&self, provider_id: &str) -> Vec<&Entity> {
        self.providers
            .get(provider_id)
            .and_then(|p| p.get("cache"))
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    pub fn config(&self, section: &str) -> Option<&Entity> {
        self.config.get(section)
    }

    /// Notices, most recent first. Entries that no longer parse are skipped.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .items
            .iter()
            .filter_map(|e| serde_json::from_value(Value::Object(e.clone())).ok())
            .collect()
    }

    /// Quality tiers published in the `consts` config section.
    pub fn quality_vocabulary(&self) -> QualityVocabulary {
        self.config("consts")
            .map(|consts| QualityVocabulary::from_consts(&Value::Object(consts.clone())))
            .unwrap_or_default()
    }

    /// A show's configured quality sets (`config.qualities`).
    pub fn show_qualities(&self, slug: &str) -> Option<Qualities> {
        let qualities = self
            .get(EntityKind::Show, slug)?
            .get("config")?
            .get("qualities")?;
        serde_json::from_value(qualities.clone()).ok()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
