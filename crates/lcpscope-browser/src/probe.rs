//! `PageProbe` implementation over a live session.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use lcpscope_vitals::{PageProbe, VitalsError};

use crate::cdp::{CdpError, PageSession};
use crate::network::RequestTracker;

/// Bridges the idle detector to a live page session and its request
/// tracker.
pub struct SessionProbe {
    session: Arc<PageSession>,
    tracker: Arc<RequestTracker>,
}

impl SessionProbe {
    pub fn new(session: Arc<PageSession>, tracker: Arc<RequestTracker>) -> Self {
        Self { session, tracker }
    }
}

#[async_trait]
impl PageProbe for SessionProbe {
    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), VitalsError> {
        self.tracker
            .wait_for_network_idle(timeout)
            .await
            .map_err(|e| VitalsError::Page(e.to_string()))
    }

    async fn now_ms(&self) -> Result<f64, VitalsError> {
        let value = self
            .session
            .evaluate("performance.now()")
            .await
            .map_err(|e| VitalsError::Page(e.to_string()))?;
        value
            .as_f64()
            .ok_or_else(|| VitalsError::Page("performance.now() returned a non-number".into()))
    }
}

/// Sample the document's time-to-first-byte (navigation `responseStart`).
pub async fn navigation_ttfb(session: &PageSession) -> Result<f64, CdpError> {
    let value = session
        .evaluate("performance.getEntriesByType('navigation')[0].responseStart")
        .await?;
    value
        .as_f64()
        .ok_or_else(|| CdpError::InvalidResponse("Navigation timing unavailable".to_string()))
}
