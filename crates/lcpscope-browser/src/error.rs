//! Browser-layer error types.

use thiserror::Error;

use crate::cdp::CdpError;

/// Errors from the browser collaborator.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Chrome not found. Install Google Chrome or Chromium.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Network activity did not settle in time")]
    NetworkIdleTimeout,

    #[error("Unknown device preset: {0}")]
    UnknownPreset(String),

    #[error("Page event stream already consumed")]
    EventsTaken,

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error(transparent)]
    Cdp(#[from] CdpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
