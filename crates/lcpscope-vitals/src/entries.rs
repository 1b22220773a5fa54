//! Append-only collection of page-side observer entries.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Kinds of performance entries the page-side observers deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A largest-contentful-paint candidate element.
    RenderCandidate,
    /// A main-thread busy interval.
    LongTask,
    /// A layout-shift record.
    LayoutShift,
}

/// Element bounding rectangle as reported by the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// A single observer-delivered entry.
///
/// Only `start_time` and `duration` are common to all kinds; the rest is
/// populated for render candidates. Entries are immutable once recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub name: Option<String>,
    /// Resource URL of the candidate element. Empty or absent for
    /// inline/text elements.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub render_time: Option<f64>,
    #[serde(default)]
    pub load_time: Option<f64>,
    #[serde(default)]
    pub rect: Option<ElementRect>,
    #[serde(default)]
    pub fetch_priority: Option<String>,
    #[serde(default)]
    pub preloaded: Option<bool>,
}

impl PerformanceEntry {
    /// Resource URL, treating the page's empty-string marker as absent.
    pub fn resource_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Default)]
struct CollectorState {
    entries: HashMap<EntryKind, Vec<PerformanceEntry>>,
    subscribers: HashMap<EntryKind, Vec<mpsc::UnboundedSender<PerformanceEntry>>>,
}

/// Ordered, append-only store of observer entries for one page session.
///
/// `record` is called from the session's event-dispatch task; `query` and
/// `subscribe` from the audit flow. A query observes exactly the entries
/// recorded before it returns, in arrival order. Nothing is ever removed.
#[derive(Default)]
pub struct EntryCollector {
    inner: Mutex<CollectorState>,
}

impl EntryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` and forward it to current subscribers for `kind`.
    pub fn record(&self, kind: EntryKind, entry: PerformanceEntry) {
        let mut state = self.inner.lock();
        state.entries.entry(kind).or_default().push(entry.clone());
        if let Some(subscribers) = state.subscribers.get_mut(&kind) {
            subscribers.retain(|tx| tx.send(entry.clone()).is_ok());
        }
    }

    /// Snapshot of all entries recorded so far for `kind`, in arrival order.
    pub fn query(&self, kind: EntryKind) -> Vec<PerformanceEntry> {
        self.inner
            .lock()
            .entries
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of entries recorded so far for `kind`.
    pub fn count(&self, kind: EntryKind) -> usize {
        self.inner
            .lock()
            .entries
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Subscribe to entries of `kind`.
    ///
    /// Entries recorded before the call are replayed into the channel first,
    /// in their original arrival order; entries recorded afterwards are
    /// delivered live, once each.
    pub fn subscribe(&self, kind: EntryKind) -> mpsc::UnboundedReceiver<PerformanceEntry> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.inner.lock();
        if let Some(existing) = state.entries.get(&kind) {
            for entry in existing {
                let _ = tx.send(entry.clone());
            }
        }
        state.subscribers.entry(kind).or_default().push(tx);
        rx
    }
}

#[cfg(test)]
#[path = "entries_tests.rs"]
mod tests;
