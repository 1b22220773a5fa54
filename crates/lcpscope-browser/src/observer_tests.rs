use serde_json::json;

use super::*;

fn binding_event(name: &str, payload: &str) -> serde_json::Value {
    json!({
        "name": name,
        "payload": payload,
        "executionContextId": 1
    })
}

#[test]
fn records_lcp_entries_as_render_candidates() {
    let collector = EntryCollector::new();
    let payload = json!({
        "type": "largest-contentful-paint",
        "entry": {
            "startTime": 412.3,
            "duration": 0,
            "size": 83520,
            "url": "https://example.com/hero.jpg",
            "fetchPriority": "high",
            "preloaded": true
        }
    });
    handle_binding_called(
        &binding_event(BINDING_NAME, &payload.to_string()),
        &collector,
    );

    let candidates = collector.query(EntryKind::RenderCandidate);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].start_time, 412.3);
    assert_eq!(candidates[0].preloaded, Some(true));
}

#[test]
fn records_long_tasks_and_layout_shifts() {
    let collector = EntryCollector::new();
    let long_task = json!({"type": "longtask", "entry": {"startTime": 100.0, "duration": 80.0}});
    let shift = json!({"type": "layout-shift", "entry": {"startTime": 300.0, "duration": 0.0}});
    handle_binding_called(
        &binding_event(BINDING_NAME, &long_task.to_string()),
        &collector,
    );
    handle_binding_called(&binding_event(BINDING_NAME, &shift.to_string()), &collector);

    assert_eq!(collector.count(EntryKind::LongTask), 1);
    assert_eq!(collector.count(EntryKind::LayoutShift), 1);
}

#[test]
fn ignores_other_bindings() {
    let collector = EntryCollector::new();
    let payload = json!({"type": "longtask", "entry": {"startTime": 1.0, "duration": 60.0}});
    handle_binding_called(
        &binding_event("__other_binding", &payload.to_string()),
        &collector,
    );
    assert_eq!(collector.count(EntryKind::LongTask), 0);
}

#[test]
fn ignores_unknown_entry_types() {
    let collector = EntryCollector::new();
    let payload = json!({"type": "long-animation-frame", "entry": {"startTime": 1.0}});
    handle_binding_called(
        &binding_event(BINDING_NAME, &payload.to_string()),
        &collector,
    );
    assert_eq!(collector.count(EntryKind::RenderCandidate), 0);
    assert_eq!(collector.count(EntryKind::LongTask), 0);
}

#[test]
fn malformed_payload_does_not_panic() {
    let collector = EntryCollector::new();
    handle_binding_called(&binding_event(BINDING_NAME, "not json"), &collector);
    handle_binding_called(&json!({"name": BINDING_NAME}), &collector);
    assert_eq!(collector.count(EntryKind::RenderCandidate), 0);
}
