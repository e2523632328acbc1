// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tvm_core::Envelope;

use super::hydrate::{
    HydrationError, HydrationRequest, HydrationResult, HydrationSource, ResultsQuery,
};

/// Serialize an envelope the way the server frames it.
pub fn frame(event: &str, data: Value) -> String {
    Envelope::new(event, data).to_json().unwrap()
}

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    NotFound,
    Status(u16),
}

impl MockResponse {
    fn into_result(self) -> HydrationResult<Value> {
        match self {
            MockResponse::Json(v) => Ok(v),
            MockResponse::NotFound => Err(HydrationError::NotFound),
            MockResponse::Status(status) => Err(HydrationError::Http {
                status,
                message: "mock".into(),
            }),
        }
    }
}

/// Hydration source answering from a path → response table.
///
/// Unscripted paths answer 404. Every requested path is recorded.
#[derive(Default)]
pub struct MockSource {
    responses: Mutex<HashMap<String, MockResponse>>,
    calls: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, request: &HydrationRequest, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(request.path(), response);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, request: HydrationRequest) -> HydrationResult<Value> {
        let path = request.path();
        self.calls.lock().unwrap().push(path.clone());
        self.responses
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .unwrap_or(MockResponse::NotFound)
            .into_result()
    }

    fn answer_list(&self, request: HydrationRequest) -> HydrationResult<Vec<Value>> {
        match self.answer(request)? {
            Value::Array(items) => Ok(items),
            other => Err(HydrationError::Decode(format!("not a list: {}", other))),
        }
    }
}

type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

impl HydrationSource for MockSource {
    fn providers(&self) -> BoxFuture<'_, HydrationResult<Vec<Value>>> {
        Box::pin(async move { self.answer_list(HydrationRequest::Providers) })
    }

    fn provider_results(
        &self,
        provider_id: &str,
        query: &ResultsQuery,
    ) -> BoxFuture<'_, HydrationResult<Vec<Value>>> {
        let request = HydrationRequest::ProviderResults {
            provider: provider_id.to_string(),
            query: query.clone(),
        };
        Box::pin(async move { self.answer_list(request) })
    }

    fn series(&self, limit: u32) -> BoxFuture<'_, HydrationResult<Vec<Value>>> {
        Box::pin(async move { self.answer_list(HydrationRequest::Series { limit }) })
    }

    fn config(&self, section: &str) -> BoxFuture<'_, HydrationResult<Value>> {
        let request = HydrationRequest::Config {
            section: section.to_string(),
        };
        Box::pin(async move { self.answer(request) })
    }
}
