// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use serde_json::json;
use yare::parameterized;

fn entity(value: Value) -> Entity {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn key_of(kind: EntityKind, value: Value) -> Option<String> {
    (kind.strategy().key)(&entity(value))
}

#[parameterized(
    top_level_slug = { json!({ "slug": "tvdb301824" }), Some("tvdb301824") },
    nested_slug = { json!({ "id": { "tvdb": 301824, "slug": "tvdb301824" } }), Some("tvdb301824") },
    indexer_and_id = { json!({ "indexer": "tvdb", "id": { "tvdb": 301824 } }), Some("tvdb301824") },
    indexer_string_id = { json!({ "indexer": "tmdb", "id": { "tmdb": "9" } }), Some("tmdb9") },
    indexer_without_id = { json!({ "indexer": "tvdb", "id": { "tmdb": 1 } }), None },
    empty_slug = { json!({ "slug": "" }), None },
    nothing = { json!({ "title": "Show" }), None },
)]
fn show_keys(payload: Value, expected: Option<&str>) {
    assert_eq!(key_of(EntityKind::Show, payload), expected.map(String::from));
}

#[parameterized(
    provider = { EntityKind::Provider, json!({ "id": "nyaa" }), "nyaa" },
    cache_result = { EntityKind::CacheResult, json!({ "identifier": "abc" }), "abc" },
    queue_item = { EntityKind::QueueItem, json!({ "identifier": 17 }), "17" },
    show_queue_item = { EntityKind::ShowQueueItem, json!({ "identifier": "q-1" }), "q-1" },
    notice = { EntityKind::Notice, json!({ "hash": "h1" }), "h1" },
)]
fn natural_keys(kind: EntityKind, payload: Value, expected: &str) {
    assert_eq!(key_of(kind, payload), Some(expected.to_string()));
}

#[test]
fn shallow_merge_preserves_absent_fields() {
    let mut existing = entity(json!({ "id": 5, "name": "a", "extra": "x" }));
    shallow_merge(&mut existing, entity(json!({ "id": 5, "name": "b" })));
    assert_eq!(Value::Object(existing), json!({ "id": 5, "name": "b", "extra": "x" }));
}

#[test]
fn shallow_merge_does_not_recurse() {
    let mut existing = entity(json!({ "config": { "a": 1, "b": 2 } }));
    shallow_merge(&mut existing, entity(json!({ "config": { "a": 3 } })));
    assert_eq!(Value::Object(existing), json!({ "config": { "a": 3 } }));
}

#[test]
fn cache_result_keeps_date_added_when_absent() {
    let merge = EntityKind::CacheResult.strategy().merge;
    let mut existing = entity(json!({ "identifier": "r1", "seeders": 1, "dateAdded": "2026-01-01" }));
    merge(&mut existing, entity(json!({ "identifier": "r1", "seeders": 9 })));
    assert_eq!(existing["dateAdded"], json!("2026-01-01"));
    assert_eq!(existing["seeders"], json!(9));
}

#[test]
fn cache_result_keeps_date_added_when_null() {
    let merge = EntityKind::CacheResult.strategy().merge;
    let mut existing = entity(json!({ "identifier": "r1", "dateAdded": "2026-01-01" }));
    merge(&mut existing, entity(json!({ "identifier": "r1", "dateAdded": null })));
    assert_eq!(existing["dateAdded"], json!("2026-01-01"));
}

#[test]
fn cache_result_takes_new_date_added() {
    let merge = EntityKind::CacheResult.strategy().merge;
    let mut existing = entity(json!({ "identifier": "r1", "dateAdded": "2026-01-01" }));
    merge(&mut existing, entity(json!({ "identifier": "r1", "dateAdded": "2026-02-02" })));
    assert_eq!(existing["dateAdded"], json!("2026-02-02"));
}

#[test]
fn other_kinds_overwrite_date_added() {
    let merge = EntityKind::QueueItem.strategy().merge;
    let mut existing = entity(json!({ "identifier": "q", "dateAdded": "2026-01-01" }));
    merge(&mut existing, entity(json!({ "identifier": "q", "dateAdded": null })));
    assert_eq!(existing["dateAdded"], Value::Null);
}

#[test]
fn provider_merge_leaves_cache_alone() {
    let merge = EntityKind::Provider.strategy().merge;
    let mut existing = entity(json!({ "id": "p", "name": "", "cache": [{ "identifier": "r1" }] }));
    merge(&mut existing, entity(json!({ "id": "p", "name": "Provider", "cache": [] })));
    assert_eq!(existing["name"], json!("Provider"));
    assert_eq!(existing["cache"], json!([{ "identifier": "r1" }]));
}

#[parameterized(
    show = { EntityKind::Show, Placement::Append },
    provider = { EntityKind::Provider, Placement::Append },
    cache_result = { EntityKind::CacheResult, Placement::Append },
    queue_item = { EntityKind::QueueItem, Placement::Append },
    show_queue_item = { EntityKind::ShowQueueItem, Placement::Append },
    notice = { EntityKind::Notice, Placement::Prepend },
)]
fn placements(kind: EntityKind, expected: Placement) {
    assert_eq!(kind.strategy().placement, expected);
    assert_eq!(kind.strategy().kind, kind);
}
