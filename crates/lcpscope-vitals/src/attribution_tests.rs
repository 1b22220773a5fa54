use super::*;

fn candidate(start_time: f64, url: Option<&str>, size: u64) -> PerformanceEntry {
    PerformanceEntry {
        start_time,
        url: url.map(str::to_string),
        size: Some(size),
        ..Default::default()
    }
}

fn request(url: &str, request_start: f64, response_end: f64) -> NetworkRequest {
    NetworkRequest {
        url: url.to_string(),
        frame_id: "main".to_string(),
        timing: Some(RequestTiming {
            request_start,
            response_start: request_start + 1.0,
            response_end,
        }),
    }
}

#[test]
fn selects_last_candidate_by_arrival_not_by_size() {
    // The earlier candidate is synthetically larger; arrival order must
    // still win.
    let candidates = vec![
        candidate(100.0, Some("https://example.com/a.jpg"), 900_000),
        candidate(250.0, Some("https://example.com/b.jpg"), 1_000),
        candidate(400.0, Some("https://example.com/c.jpg"), 500),
    ];

    let attribution = attribute_render(&candidates, &[], 50.0).unwrap();
    assert_eq!(attribution.candidate.start_time, 400.0);
    assert_eq!(
        attribution.candidate.url.as_deref(),
        Some("https://example.com/c.jpg")
    );
}

#[test]
fn computes_sub_phases_from_matched_request() {
    let candidates = vec![candidate(200.0, Some("https://example.com/hero.jpg"), 80_000)];
    let requests = vec![request("https://example.com/hero.jpg", 80.0, 120.0)];

    let attribution = attribute_render(&candidates, &requests, 50.0).unwrap();
    assert_eq!(attribution.ttfb, 50.0);
    assert_eq!(attribution.load_delay, Some(30.0));
    assert_eq!(attribution.load_time, Some(40.0));
    assert_eq!(attribution.render_delay, Some(80.0));
}

#[test]
fn no_candidates_is_a_distinct_failure() {
    let err = attribute_render(&[], &[], 50.0).unwrap_err();
    assert!(matches!(err, VitalsError::NoRenderCandidate));
}

#[test]
fn candidate_without_url_keeps_sub_phases_undefined() {
    // Inline/text elements report an empty url; no match is attempted.
    let candidates = vec![candidate(300.0, Some(""), 12_000)];
    let requests = vec![request("https://example.com/hero.jpg", 80.0, 120.0)];

    let attribution = attribute_render(&candidates, &requests, 50.0).unwrap();
    assert_eq!(attribution.ttfb, 50.0);
    assert_eq!(attribution.load_delay, None);
    assert_eq!(attribution.load_time, None);
    assert_eq!(attribution.render_delay, None);
}

#[test]
fn unmatched_url_keeps_sub_phases_undefined_but_reports_ttfb() {
    let candidates = vec![candidate(300.0, Some("https://example.com/hero.jpg"), 12_000)];
    let requests = vec![request("https://example.com/other.css", 80.0, 120.0)];

    let attribution = attribute_render(&candidates, &requests, 50.0).unwrap();
    assert_eq!(attribution.ttfb, 50.0);
    assert_eq!(attribution.load_delay, None);
}

#[test]
fn matched_request_without_timing_is_not_attributable() {
    let candidates = vec![candidate(300.0, Some("https://example.com/hero.jpg"), 12_000)];
    let requests = vec![NetworkRequest {
        url: "https://example.com/hero.jpg".to_string(),
        frame_id: "main".to_string(),
        timing: None,
    }];

    let attribution = attribute_render(&candidates, &requests, 50.0).unwrap();
    assert_eq!(attribution.load_time, None);
}

#[test]
fn negative_sub_phases_are_reported_unclamped() {
    // Pathological timing data: the paint precedes the response end.
    let candidates = vec![candidate(100.0, Some("https://example.com/hero.jpg"), 1)];
    let requests = vec![request("https://example.com/hero.jpg", 30.0, 150.0)];

    let attribution = attribute_render(&candidates, &requests, 50.0).unwrap();
    assert_eq!(attribution.load_delay, Some(-20.0));
    assert_eq!(attribution.render_delay, Some(-50.0));
}
