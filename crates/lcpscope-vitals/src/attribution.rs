//! Render candidate selection and sub-phase decomposition.

use crate::entries::PerformanceEntry;
use crate::error::VitalsError;
use crate::requests::{NetworkRequest, RequestTiming};

/// Timing decomposition of the selected render candidate.
///
/// The three sub-phase fields are `None` when the candidate has no matching
/// network request: "not attributable" is distinct from "no delay". Values
/// are raw arithmetic and may be negative in pathological timing data; the
/// engine does not clamp, interpretation is left to the consumer.
#[derive(Debug, Clone)]
pub struct RenderAttribution {
    /// Document time-to-first-byte (navigation `responseStart`), ms.
    pub ttfb: f64,
    /// Gap between first byte and the candidate resource's request start.
    pub load_delay: Option<f64>,
    /// Transfer duration of the candidate resource.
    pub load_time: Option<f64>,
    /// Gap between the resource completing and the paint.
    pub render_delay: Option<f64>,
    /// The candidate the decomposition describes.
    pub candidate: PerformanceEntry,
}

/// Select the authoritative render candidate and decompose its timing.
///
/// The LAST candidate in arrival order wins, not the one with the largest
/// size: the page-side observer always reports the largest-so-far element,
/// so the final delivery is definitionally the final largest one. Selecting
/// by size would silently change reported timings on pages with fluctuating
/// candidates.
pub fn attribute_render(
    candidates: &[PerformanceEntry],
    requests: &[NetworkRequest],
    ttfb: f64,
) -> Result<RenderAttribution, VitalsError> {
    let candidate = candidates.last().ok_or(VitalsError::NoRenderCandidate)?;

    let matched = candidate
        .resource_url()
        .and_then(|url| find_request_timing(requests, url));

    let mut attribution = RenderAttribution {
        ttfb,
        load_delay: None,
        load_time: None,
        render_delay: None,
        candidate: candidate.clone(),
    };

    if let Some(timing) = matched {
        attribution.load_delay = Some(timing.request_start - ttfb);
        attribution.load_time = Some(timing.response_end - timing.request_start);
        attribution.render_delay = Some(candidate.start_time - timing.response_end);
    }

    Ok(attribution)
}

fn find_request_timing(requests: &[NetworkRequest], url: &str) -> Option<RequestTiming> {
    requests
        .iter()
        .find(|request| request.url == url)
        .and_then(|request| request.timing)
}

#[cfg(test)]
#[path = "attribution_tests.rs"]
mod tests;
