//! Page-side performance observers and their delivery channel.
//!
//! A CDP binding carries observer entries out of the page: the injected
//! script installs buffered `PerformanceObserver`s and forwards every entry
//! as a JSON payload through the binding; `Runtime.bindingCalled` events
//! are decoded here and recorded into the audit's [`EntryCollector`].

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use lcpscope_vitals::{EntryCollector, EntryKind, PerformanceEntry};

use crate::cdp::{CdpError, PageSession};

pub(crate) const BINDING_NAME: &str = "__lcpscope_emit";

/// Installed after navigation; `buffered: true` replays entries the page
/// produced before the observers attached.
const OBSERVER_SCRIPT: &str = r#"
(() => {
    const emit = (type, entry) =>
        window.__lcpscope_emit(JSON.stringify({ type, entry }));

    const observe = (type, transform) => {
        new PerformanceObserver((list) => {
            for (const entry of list.getEntries()) {
                emit(type, transform ? transform(entry) : entry.toJSON());
            }
        }).observe({ type, buffered: true });
    };

    observe("longtask");
    observe("layout-shift");

    observe("largest-contentful-paint", (entry) => {
        const preloaded =
            !!entry.url &&
            [...document.getElementsByTagName("link")]
                .filter((link) => link.rel === "preload" && link.as === "image")
                .some((link) => link.href === entry.url);

        return {
            ...entry.toJSON(),
            rect: entry.element
                ? entry.element.getBoundingClientRect().toJSON()
                : null,
            fetchPriority: entry.element ? entry.element.fetchPriority : null,
            preloaded,
        };
    });
})()
"#;

/// Register the delivery binding and attach the observers to the page.
pub async fn install_observers(session: &PageSession) -> Result<(), CdpError> {
    session.add_binding(BINDING_NAME).await?;
    session.evaluate(OBSERVER_SCRIPT).await?;
    debug!("Performance observers attached");
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ObserverMessage {
    #[serde(rename = "type")]
    kind: String,
    entry: PerformanceEntry,
}

/// Decode a `Runtime.bindingCalled` event and record its entry.
pub(crate) fn handle_binding_called(params: &Value, collector: &EntryCollector) {
    if params["name"].as_str() != Some(BINDING_NAME) {
        return;
    }
    let Some(payload) = params["payload"].as_str() else {
        return;
    };

    match serde_json::from_str::<ObserverMessage>(payload) {
        Ok(message) => {
            let Some(kind) = entry_kind(&message.kind) else {
                debug!("Ignoring unknown observer entry type: {}", message.kind);
                return;
            };
            collector.record(kind, message.entry);
        }
        Err(e) => {
            warn!("Failed to decode observer payload: {}", e);
        }
    }
}

fn entry_kind(observed_type: &str) -> Option<EntryKind> {
    match observed_type {
        "largest-contentful-paint" => Some(EntryKind::RenderCandidate),
        "longtask" => Some(EntryKind::LongTask),
        "layout-shift" => Some(EntryKind::LayoutShift),
        _ => None,
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
