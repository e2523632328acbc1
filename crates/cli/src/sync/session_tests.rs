// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::connection::{ConnectionConfig, ConnectionManager, ConnectionState};
use crate::sync::hydrate::{HydrationError, ResultsQuery};
use crate::sync::test_helpers::{frame, MockResponse, MockSource};
use crate::sync::transport_tests::MockTransport;
use serde_json::json;
use std::time::Duration;
use tvm_core::EntityKind;

#[test]
fn apply_routes_frames() {
    let mut session = Session::new();
    session.apply(Inbound::Frame(frame(
        "showAdded",
        json!({ "slug": "tvdb1", "title": "A" }),
    )));
    assert_eq!(session.store().len(EntityKind::Show), 1);
}

#[tokio::test]
async fn drain_applies_in_queue_order() {
    let mut session = Session::new();
    let tx = session.sender();
    tx.send(Inbound::Frame(frame("QueueItemUpdate", json!({ "identifier": "q", "step": 1 }))))
        .await
        .unwrap();
    tx.send(Inbound::Frame(frame("QueueItemUpdate", json!({ "identifier": "q", "step": 2 }))))
        .await
        .unwrap();

    assert_eq!(session.drain(), 2);
    assert_eq!(
        session.store().get(EntityKind::QueueItem, "q").unwrap()["step"],
        json!(2)
    );
}

#[tokio::test]
async fn run_returns_store_when_producers_finish() {
    let session = Session::new();
    let tx = session.sender();
    let consumer = tokio::spawn(session.run());

    tx.send(Inbound::Frame(frame("showAdded", json!({ "slug": "tvdb1" }))))
        .await
        .unwrap();
    drop(tx);

    let store = consumer.await.unwrap();
    assert!(store.get(EntityKind::Show, "tvdb1").is_some());
}

#[tokio::test]
async fn hydration_result_is_committed_without_awaiting() {
    let request = HydrationRequest::Series { limit: 1000 };
    let source = Arc::new(MockSource::new().respond(
        &request,
        MockResponse::Json(json!([{ "slug": "tvdb1", "title": "A" }, { "slug": "tvdb2" }])),
    ));

    let session = Session::new();
    // Handle intentionally dropped: fire and forget.
    drop(session.spawn_hydration(source, request));

    let store = session.run().await;
    assert_eq!(store.len(EntityKind::Show), 2);
}

#[tokio::test]
async fn hydration_failure_reaches_caller() {
    let request = HydrationRequest::Config {
        section: "main".into(),
    };
    let source = Arc::new(MockSource::new().respond(&request, MockResponse::Status(503)));

    let session = Session::new();
    let handle = session.spawn_hydration(source, request);
    let result = handle.await.unwrap();
    assert!(matches!(result, Err(HydrationError::Http { status: 503, .. })));

    let store = session.run().await;
    assert!(store.config("main").is_none());
}

#[tokio::test]
async fn provider_results_404_hydrates_nothing() {
    let source = Arc::new(MockSource::new());
    let session = Session::new();
    let handle = session.spawn_hydration(
        source,
        HydrationRequest::ProviderResults {
            provider: "nyaa".into(),
            query: ResultsQuery::new("tvdb1", 1, None, 1000),
        },
    );
    handle.await.unwrap().unwrap();

    let store = session.run().await;
    // 404 means zero results, not a failure.
    assert!(store.cache("nyaa").is_empty());
}

#[tokio::test]
async fn push_and_hydration_share_one_store() {
    let transport = MockTransport::new();
    transport.queue_connects(&[true]);
    transport.queue_frame(frame(
        "addManualSearchResult",
        json!({ "identifier": "r1", "provider": { "id": "nyaa" }, "seeders": 9 }),
    ));

    let source = Arc::new(MockSource::new().respond(
        &HydrationRequest::Providers,
        MockResponse::Json(json!([{ "id": "nyaa", "name": "Nyaa", "config": { "enabled": true } }])),
    ));

    let session = Session::new();
    let hydration = session.spawn_hydration(source, HydrationRequest::Providers);
    let frames = session.sender();
    let consumer = tokio::spawn(session.run());

    let config = ConnectionConfig {
        url: "ws://localhost:8081/ws/ui".into(),
        max_attempts: 0,
        delay: Duration::from_millis(1),
    };
    let mut manager = ConnectionManager::with_transport(config, transport);
    assert_eq!(manager.run(frames).await, ConnectionState::Failed);
    hydration.await.unwrap().unwrap();
    drop(manager);

    let store = consumer.await.unwrap();
    let provider = store.get(EntityKind::Provider, "nyaa").unwrap();
    assert_eq!(provider["name"], json!("Nyaa"));
    assert_eq!(store.cache("nyaa").len(), 1);
}
