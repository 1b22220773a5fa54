//! Routes a page session's pushed events into the audit's collectors.

use std::sync::Arc;

use tracing::debug;

use lcpscope_vitals::EntryCollector;

use crate::cdp::PageSession;
use crate::error::BrowserError;
use crate::network::RequestTracker;
use crate::observer;

/// Owns the dispatch task that feeds the entry collector and request
/// tracker from one session's event stream.
pub struct PageInstrumentation {
    tracker: Arc<RequestTracker>,
    dispatch: tokio::task::JoinHandle<()>,
}

impl PageInstrumentation {
    /// Attach to `session`'s event stream. Can only be done once per
    /// session.
    pub fn attach(
        session: &PageSession,
        collector: Arc<EntryCollector>,
    ) -> Result<Self, BrowserError> {
        let mut events = session.take_events().ok_or(BrowserError::EventsTaken)?;
        let tracker = Arc::new(RequestTracker::new());

        let dispatch = tokio::spawn({
            let tracker = tracker.clone();
            async move {
                while let Some(event) = events.recv().await {
                    match event.method.as_str() {
                        "Runtime.bindingCalled" => {
                            observer::handle_binding_called(&event.params, &collector);
                        }
                        "Network.requestWillBeSent" => {
                            tracker.on_request_will_be_sent(&event.params);
                        }
                        "Network.loadingFinished" => {
                            tracker.on_loading_finished(&event.params);
                        }
                        "Network.loadingFailed" => {
                            tracker.on_loading_failed(&event.params);
                        }
                        _ => {}
                    }
                }
                debug!("Page event stream closed");
            }
        });

        Ok(Self { tracker, dispatch })
    }

    /// The request tracker fed by this instrumentation.
    pub fn tracker(&self) -> Arc<RequestTracker> {
        self.tracker.clone()
    }

    /// Sample the page's resource-timing records and join them into the
    /// tracked request list.
    pub async fn fill_request_timings(&self, session: &PageSession) -> Result<(), BrowserError> {
        let samples = crate::network::sample_resource_timing(session).await?;
        debug!("Sampled {} resource-timing records", samples.len());
        self.tracker.apply_resource_timing(&samples);
        Ok(())
    }
}

impl Drop for PageInstrumentation {
    fn drop(&mut self) {
        self.dispatch.abort();
    }
}
