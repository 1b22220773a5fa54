//! # lcpscope-browser
//!
//! The browser-session collaborator for lcpscope: a pure Rust CDP client
//! over WebSocket, a Chrome process launcher, network request tracking,
//! page-side observer injection, device emulation presets, and the
//! highlight/screenshot helpers. The attribution engine in
//! `lcpscope-vitals` consumes this crate only through data it collects and
//! the `PageProbe` trait implemented here.

pub mod cdp;
mod devices;
mod error;
mod highlight;
mod instrument;
mod launcher;
mod network;
mod observer;
mod probe;

pub use devices::{DevicePreset, apply_preset, preset};
pub use error::BrowserError;
pub use highlight::{capture_screenshot, highlight_area};
pub use instrument::PageInstrumentation;
pub use launcher::{BrowserConfig, ChromeLauncher};
pub use network::RequestTracker;
pub use observer::install_observers;
pub use probe::{SessionProbe, navigation_ttfb};
