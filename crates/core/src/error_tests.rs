// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    missing_key = {
        Error::MissingKey { kind: EntityKind::QueueItem, field: "identifier" },
        "queue item payload has no natural key (missing 'identifier')"
    },
    not_an_object = {
        Error::NotAnObject { kind: EntityKind::Show, found: "array".into() },
        "show payload must be a JSON object, got array"
    },
    malformed = {
        Error::MalformedPayload { tag: "configUpdated".into(), reason: "missing section".into() },
        "malformed 'configUpdated' payload: missing section"
    },
)]
fn error_display(err: Error, expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn json_error_converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().starts_with("json error:"));
}
