use lcpscope_vitals::{
    NetworkRequest, PerformanceEntry, RenderAttribution, RequestTiming, VitalsReport,
    classify_blocking,
};

use super::render_text;

fn sample_report() -> VitalsReport {
    let candidate = PerformanceEntry {
        start_time: 412.3,
        url: Some("https://example.com/hero.jpg".to_string()),
        ..Default::default()
    };
    let attribution = RenderAttribution {
        ttfb: 50.2,
        load_delay: Some(30.0),
        load_time: Some(40.4),
        render_delay: Some(80.0),
        candidate: candidate.clone(),
    };
    let requests = vec![NetworkRequest {
        url: "https://example.com/app.js".to_string(),
        frame_id: "MAIN".to_string(),
        timing: Some(RequestTiming {
            request_start: 20.0,
            response_start: 60.0,
            response_end: 120.0,
        }),
    }];
    let blocking = classify_blocking(&requests, &candidate, &candidate);
    VitalsReport::new(attribution, blocking, requests)
}

#[test]
fn text_report_lists_timings_and_blocking_resources() {
    let text = render_text(&sample_report());

    assert!(text.contains("TTFB: 50 ms"));
    assert!(text.contains("LCP: 412 ms (https://example.com/hero.jpg)"));
    assert!(text.contains("Load delay: 30 ms"));
    assert!(text.contains("Load time: 40 ms"));
    assert!(text.contains("Render delay: 80 ms"));
    assert!(text.contains("Found 1 resources that potentially blocked LCP:"));
    assert!(text.contains("  - https://example.com/app.js (100 ms potential savings)"));
}

#[test]
fn unattributable_sub_parts_render_as_not_available() {
    let mut report = sample_report();
    report.lcp.sub_parts.load_delay = None;
    report.lcp.sub_parts.load_time = None;
    report.lcp.sub_parts.render_delay = None;
    report.lcp.url = Some(String::new());

    let text = render_text(&report);
    assert!(text.contains("LCP: 412 ms (inline element)"));
    assert!(text.contains("Load delay: n/a"));
    assert!(text.contains("Load time: n/a"));
    assert!(text.contains("Render delay: n/a"));
}
