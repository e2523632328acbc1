// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-entity merge strategies.
//!
//! Every mirrored entity kind has a fixed strategy:
//! - Show: keyed by slug (or `{indexer}{id}`), append, shallow merge
//! - Provider: keyed by `id`, append, shallow merge that never touches `cache`
//! - CacheResult: keyed by `identifier` within its provider, append, shallow
//!   merge that keeps an existing `dateAdded`
//! - QueueItem / ShowQueueItem: keyed by `identifier`, append, shallow merge
//! - Notice: keyed by `hash`, prepend (most recent first), shallow merge
//!
//! Merges are idempotent: applying the same partial twice equals applying it
//! once.

use std::fmt;

use serde_json::Value;

use crate::store::Entity;

/// Kinds of entity mirrored from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Show,
    Provider,
    CacheResult,
    QueueItem,
    ShowQueueItem,
    Notice,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Show => "show",
            EntityKind::Provider => "provider",
            EntityKind::CacheResult => "cache result",
            EntityKind::QueueItem => "queue item",
            EntityKind::ShowQueueItem => "show queue item",
            EntityKind::Notice => "notice",
        }
    }

    /// The merge strategy for this kind.
    pub fn strategy(self) -> &'static MergeStrategy {
        match self {
            EntityKind::Show => &SHOW,
            EntityKind::Provider => &PROVIDER,
            EntityKind::CacheResult => &CACHE_RESULT,
            EntityKind::QueueItem => &QUEUE_ITEM,
            EntityKind::ShowQueueItem => &SHOW_QUEUE_ITEM,
            EntityKind::Notice => &NOTICE,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a newly seen entity lands in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

/// How one entity kind is keyed, merged, and placed.
#[derive(Debug)]
pub struct MergeStrategy {
    pub kind: EntityKind,
    /// Field reported when a payload has no key.
    pub key_field: &'static str,
    pub key: fn(&Entity) -> Option<String>,
    pub merge: fn(&mut Entity, Entity),
    pub placement: Placement,
}

static SHOW: MergeStrategy = MergeStrategy {
    kind: EntityKind::Show,
    key_field: "slug",
    key: show_key,
    merge: shallow_merge,
    placement: Placement::Append,
};

static PROVIDER: MergeStrategy = MergeStrategy {
    kind: EntityKind::Provider,
    key_field: "id",
    key: id_key,
    merge: provider_merge,
    placement: Placement::Append,
};

static CACHE_RESULT: MergeStrategy = MergeStrategy {
    kind: EntityKind::CacheResult,
    key_field: "identifier",
    key: identifier_key,
    merge: cache_result_merge,
    placement: Placement::Append,
};

static QUEUE_ITEM: MergeStrategy = MergeStrategy {
    kind: EntityKind::QueueItem,
    key_field: "identifier",
    key: identifier_key,
    merge: shallow_merge,
    placement: Placement::Append,
};

static SHOW_QUEUE_ITEM: MergeStrategy = MergeStrategy {
    kind: EntityKind::ShowQueueItem,
    key_field: "identifier",
    key: identifier_key,
    merge: shallow_merge,
    placement: Placement::Append,
};

static NOTICE: MergeStrategy = MergeStrategy {
    kind: EntityKind::Notice,
    key_field: "hash",
    key: hash_key,
    merge: shallow_merge,
    placement: Placement::Prepend,
};

/// Renders a string or number as a key. Empty strings are not keys.
pub(crate) fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Shows are addressed by slug. Payloads without one derive it from the
/// indexer name and the indexer-local id, e.g. `tvdb` + `301824`.
fn show_key(entity: &Entity) -> Option<String> {
    let id = entity.get("id");
    if let Some(slug) = entity
        .get("slug")
        .or_else(|| id.and_then(|id| id.get("slug")))
        .and_then(scalar_key)
    {
        return Some(slug);
    }

    let indexer = entity.get("indexer").and_then(Value::as_str)?;
    let local_id = id.and_then(|id| id.get(indexer)).and_then(scalar_key)?;
    Some(format!("{indexer}{local_id}"))
}

fn id_key(entity: &Entity) -> Option<String> {
    entity.get("id").and_then(scalar_key)
}

fn identifier_key(entity: &Entity) -> Option<String> {
    entity.get("identifier").and_then(scalar_key)
}

fn hash_key(entity: &Entity) -> Option<String> {
    entity.get("hash").and_then(scalar_key)
}

/// Field-by-field overwrite; fields absent from `partial` keep their value.
pub fn shallow_merge(existing: &mut Entity, partial: Entity) {
    for (field, value) in partial {
        existing.insert(field, value);
    }
}

/// The nested `cache` list is owned by cache-result upserts, so provider
/// updates never replace it.
fn provider_merge(existing: &mut Entity, mut partial: Entity) {
    if existing.contains_key("cache") {
        partial.remove("cache");
    }
    shallow_merge(existing, partial);
}

/// An update without `dateAdded` keeps the one already recorded.
fn cache_result_merge(existing: &mut Entity, mut partial: Entity) {
    let has_existing = existing.get("dateAdded").is_some_and(|v| !v.is_null());
    let has_incoming = partial.get("dateAdded").is_some_and(|v| !v.is_null());
    if has_existing && !has_incoming {
        partial.remove("dateAdded");
    }
    shallow_merge(existing, partial);
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
