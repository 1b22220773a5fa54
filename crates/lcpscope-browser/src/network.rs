//! Network request tracking for one page session.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, trace};

use lcpscope_vitals::{NetworkRequest, RequestTiming};

use crate::cdp::{CdpError, PageSession};
use crate::error::BrowserError;

/// How long the network has to stay quiet to count as idle.
const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A resource-timing record sampled from the page, ms since navigation start.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceSample {
    pub name: String,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
}

struct TrackerState {
    /// Requests in the order the session observed them being initiated.
    requests: Vec<NetworkRequest>,
    /// Request IDs still awaiting completion.
    inflight: HashSet<String>,
    last_activity: Instant,
}

/// Observes `Network.*` events and answers the network-idle question.
///
/// Requests are appended as they are initiated; their timing snapshots stay
/// empty until [`RequestTracker::apply_resource_timing`] joins in the
/// page's resource-timing records after the page has gone idle.
pub struct RequestTracker {
    inner: Mutex<TrackerState>,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TrackerState {
                requests: Vec::new(),
                inflight: HashSet::new(),
                last_activity: Instant::now(),
            }),
        }
    }

    pub(crate) fn on_request_will_be_sent(&self, params: &Value) {
        let Some(url) = params["request"]["url"].as_str() else {
            return;
        };
        let frame_id = params["frameId"].as_str().unwrap_or_default();
        trace!("Request started: {}", url);

        let mut state = self.inner.lock();
        state.requests.push(NetworkRequest {
            url: url.to_string(),
            frame_id: frame_id.to_string(),
            timing: None,
        });
        if let Some(request_id) = params["requestId"].as_str() {
            state.inflight.insert(request_id.to_string());
        }
        state.last_activity = Instant::now();
    }

    pub(crate) fn on_loading_finished(&self, params: &Value) {
        self.finish(params);
    }

    pub(crate) fn on_loading_failed(&self, params: &Value) {
        self.finish(params);
    }

    fn finish(&self, params: &Value) {
        let Some(request_id) = params["requestId"].as_str() else {
            return;
        };
        let mut state = self.inner.lock();
        state.inflight.remove(request_id);
        state.last_activity = Instant::now();
    }

    /// Number of requests still awaiting completion.
    pub fn inflight_count(&self) -> usize {
        self.inner.lock().inflight.len()
    }

    /// Snapshot of all observed requests, in arrival order.
    pub fn requests(&self) -> Vec<NetworkRequest> {
        self.inner.lock().requests.clone()
    }

    /// Requests scoped to the main document context, with the navigation
    /// request itself excluded.
    pub fn main_frame_requests(&self, frame_id: &str, document_url: &str) -> Vec<NetworkRequest> {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|request| request.frame_id == frame_id && request.url != document_url)
            .cloned()
            .collect()
    }

    /// Join sampled resource-timing records into the request list by URL.
    pub(crate) fn apply_resource_timing(&self, samples: &[ResourceSample]) {
        let mut by_url: HashMap<&str, RequestTiming> = HashMap::new();
        for sample in samples {
            by_url.entry(sample.name.as_str()).or_insert(RequestTiming {
                request_start: sample.request_start,
                response_start: sample.response_start,
                response_end: sample.response_end,
            });
        }

        let mut state = self.inner.lock();
        for request in &mut state.requests {
            if request.timing.is_none() {
                request.timing = by_url.get(request.url.as_str()).copied();
            }
        }
    }

    /// Wait until no request has been in flight for [`NETWORK_QUIET_WINDOW`],
    /// failing after `timeout`.
    pub async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            let (inflight, last_activity) = {
                let state = self.inner.lock();
                (state.inflight.len(), state.last_activity)
            };
            if inflight == 0 && last_activity.elapsed() >= NETWORK_QUIET_WINDOW {
                debug!("Network idle");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::NetworkIdleTimeout);
            }
            tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        }
    }
}

/// Sample the page's resource-timing records.
pub(crate) async fn sample_resource_timing(
    session: &PageSession,
) -> Result<Vec<ResourceSample>, CdpError> {
    let value = session
        .evaluate(
            "performance.getEntriesByType('resource').map((e) => ({ \
                name: e.name, \
                requestStart: e.requestStart, \
                responseStart: e.responseStart, \
                responseEnd: e.responseEnd \
            }))",
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;
