//! Classification of requests that plausibly delayed the render.

use serde::Serialize;

use crate::entries::PerformanceEntry;
use crate::requests::{NetworkRequest, RequestTiming};

/// A request that plausibly delayed the selected render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockingResource {
    pub url: String,
    pub timing: RequestTiming,
    /// Estimated savings from removing the request, ms (rounded transfer
    /// duration).
    pub savings: i64,
}

/// Filter `requests` down to those that plausibly delayed the render, in
/// arrival order.
///
/// The window is anchored to the FIRST observed candidate's start time:
/// blocking-ness is about the first moment a render candidate existed, not
/// the final, larger one. This is a heuristic, not a proof of causality;
/// it favors over-inclusion so potential causes are reported for
/// inspection rather than hidden.
pub fn classify_blocking(
    requests: &[NetworkRequest],
    candidate: &PerformanceEntry,
    first_candidate: &PerformanceEntry,
) -> Vec<BlockingResource> {
    requests
        .iter()
        .filter_map(|request| {
            // No timing snapshot means no measurable transfer window.
            let timing = request.timing?;

            // The render resource itself is accounted for in the sub-phase
            // decomposition, not double-counted as blocking.
            let is_candidate_resource = candidate
                .resource_url()
                .is_some_and(|url| url == request.url);
            let finished_before_first_paint =
                timing.response_end < first_candidate.start_time;
            // Zero transfer duration marks a local cache hit, which cannot
            // have contributed measurable blocking time.
            let transferred = timing.response_end - timing.request_start > 0.0;

            (!is_candidate_resource && finished_before_first_paint && transferred).then(|| {
                BlockingResource {
                    url: request.url.clone(),
                    timing,
                    savings: (timing.response_end - timing.request_start).round() as i64,
                }
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "blocking_tests.rs"]
mod tests;
