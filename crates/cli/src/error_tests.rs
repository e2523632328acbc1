// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn connection_failed_includes_hint() {
    let err = Error::ConnectionFailed {
        url: "ws://localhost:8081/ws/ui".into(),
        warning: "gave up".into(),
    };
    let message = err.to_string();
    assert!(message.starts_with("gave up"));
    assert!(message.contains("hint: check that the server at ws://localhost:8081/ws/ui"));
}

#[test]
fn hydration_errors_convert() {
    let err: Error = HydrationError::NotFound.into();
    assert_eq!(err.to_string(), "hydration failed: not found");
}
