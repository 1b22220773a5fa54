//! # lcpscope-vitals
//!
//! The idle-detection and render-attribution engine behind lcpscope.
//!
//! This crate owns the temporal reasoning of a page audit: collecting
//! observer entries as they arrive, deciding when the page has stopped
//! producing significant work, selecting the authoritative largest-paint
//! candidate, decomposing its latency into sub-phases, and classifying
//! which network requests plausibly delayed it. It knows nothing about
//! browsers; the session side is reached through the [`PageProbe`] seam.

mod attribution;
mod blocking;
mod entries;
mod error;
mod idle;
mod report;
mod requests;

pub use attribution::{RenderAttribution, attribute_render};
pub use blocking::{BlockingResource, classify_blocking};
pub use entries::{ElementRect, EntryCollector, EntryKind, PerformanceEntry};
pub use error::VitalsError;
pub use idle::{IdleConfig, IdleDetector, IdleOutcome, PageProbe};
pub use report::{LcpReport, Optimizations, SubParts, TtfbReport, VitalsReport};
pub use requests::{NetworkRequest, RequestTiming};
