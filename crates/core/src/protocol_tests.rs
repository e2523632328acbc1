// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use serde_json::json;
use yare::parameterized;

fn decode(event: &str, data: Value) -> Result<Event> {
    Event::from_envelope(Envelope::new(event, data))
}

#[test]
fn envelope_parses_wire_frame() {
    let frame = r#"{"event":"showUpdated","data":{"slug":"tvdb1","title":"A"}}"#;
    let envelope = Envelope::from_json(frame).unwrap();
    assert_eq!(envelope.event, "showUpdated");
    assert_eq!(envelope.data["title"], json!("A"));
}

#[test]
fn envelope_without_data_defaults_to_null() {
    let envelope = Envelope::from_json(r#"{"event":"ping"}"#).unwrap();
    assert_eq!(envelope.data, Value::Null);
}

#[test]
fn envelope_json_is_single_line() {
    let envelope = Envelope::new("notification", json!({ "body": "line1\nline2" }));
    let json = envelope.to_json().unwrap();
    assert!(!json.contains('\n'));
    assert_eq!(Envelope::from_json(&json).unwrap(), envelope);
}

#[parameterized(
    notification = { "notification", EventTag::Notification },
    config_updated = { "configUpdated", EventTag::ConfigUpdated },
    show_updated = { "showUpdated", EventTag::ShowUpdated },
    show_added = { "showAdded", EventTag::ShowAdded },
    manual_search = { "addManualSearchResult", EventTag::AddManualSearchResult },
    queue_update = { "QueueItemUpdate", EventTag::QueueItemUpdate },
    queue_show_add = { "QueueItemShowAdd", EventTag::QueueItemShowAdd },
)]
fn tags_parse_and_render(wire: &str, tag: EventTag) {
    assert_eq!(EventTag::parse(wire), Some(tag));
    assert_eq!(tag.as_str(), wire);
}

#[parameterized(
    lowercase_queue = { "queueItemUpdate" },
    empty = { "" },
    other = { "somethingElse" },
)]
fn unknown_tags_do_not_parse(wire: &str) {
    assert_eq!(EventTag::parse(wire), None);
}

#[test]
fn decode_notification() {
    let event = decode(
        "notification",
        json!({ "body": "b", "hash": "h1", "type": "success", "title": "t" }),
    )
    .unwrap();
    assert_eq!(
        event,
        Event::Notification(Notice {
            hash: "h1".into(),
            kind: "success".into(),
            title: "t".into(),
            body: "b".into(),
        })
    );
}

#[test]
fn decode_notification_without_hash_is_malformed() {
    let err = decode("notification", json!({ "body": "b" })).unwrap_err();
    assert!(matches!(err, Error::MalformedPayload { ref tag, .. } if tag == "notification"));
}

#[test]
fn decode_config_updated() {
    let event = decode(
        "configUpdated",
        json!({ "section": "main", "config": { "theme": "dark" } }),
    )
    .unwrap();
    let Event::ConfigUpdated { section, config } = event else {
        panic!("wrong event");
    };
    assert_eq!(section, "main");
    assert_eq!(config["theme"], json!("dark"));
}

#[test]
fn decode_single_search_result() {
    let event = decode("addManualSearchResult", json!({ "identifier": "r1" })).unwrap();
    let Event::ManualSearchResults(results) = event else {
        panic!("wrong event");
    };
    assert_eq!(results.len(), 1);
}

#[test]
fn decode_search_result_list() {
    let event = decode(
        "addManualSearchResult",
        json!([{ "identifier": "r1" }, { "identifier": "r2" }]),
    )
    .unwrap();
    assert!(matches!(event, Event::ManualSearchResults(ref r) if r.len() == 2));
}

#[test]
fn decode_show_with_non_object_is_error() {
    let err = decode("showUpdated", json!("nope")).unwrap_err();
    assert!(matches!(err, Error::NotAnObject { kind: EntityKind::Show, .. }));
}

#[test]
fn decode_unknown_tag_keeps_payload() {
    let event = decode("mystery", json!({ "x": 1 })).unwrap();
    assert_eq!(event.tag(), "mystery");
    assert_eq!(
        event,
        Event::Unknown {
            tag: "mystery".into(),
            data: json!({ "x": 1 })
        }
    );
}

#[test]
fn event_tag_matches_wire_tag() {
    let event = decode("QueueItemShowAdd", json!({ "identifier": "q" })).unwrap();
    assert_eq!(event.tag(), "QueueItemShowAdd");
}

#[test]
fn fallback_notice_hash_is_stable() {
    let a = Notice::fallback("mystery", &json!({ "x": 1 }), None);
    let b = Notice::fallback("mystery", &json!({ "x": 1 }), None);
    let c = Notice::fallback("mystery", &json!({ "x": 2 }), None);
    assert_eq!(a.hash, b.hash);
    assert_ne!(a.hash, c.hash);
    assert_eq!(a.hash.len(), 64);
    assert!(a.title.contains("mystery"));
    assert_eq!(a.body, r#"{"x":1}"#);
}

#[test]
fn notice_to_entity_uses_wire_field_names() {
    let notice = Notice::fallback("mystery", &Value::Null, Some("bad shape"));
    let entity = notice.to_entity().unwrap();
    assert_eq!(entity["type"], json!("notice"));
    assert!(entity["title"].as_str().unwrap().contains("bad shape"));
}
