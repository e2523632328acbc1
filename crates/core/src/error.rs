// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tvm-core operations.

use thiserror::Error;

use crate::merge::EntityKind;

/// All possible errors that can occur in tvm-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} payload has no natural key (missing '{field}')")]
    MissingKey {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("{kind} payload must be a JSON object, got {found}")]
    NotAnObject { kind: EntityKind, found: String },

    #[error("malformed '{tag}' payload: {reason}")]
    MalformedPayload { tag: String, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tvm-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
