//! Network request records observed during a page session.

use serde::{Deserialize, Serialize};

/// Timing snapshot for a request, in ms since navigation start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTiming {
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
}

/// A network request recorded as the session observed it being initiated.
///
/// The timing snapshot is filled in lazily from the page's resource-timing
/// records once the response has completed; a request whose response never
/// completed (or that left no resource-timing record) carries `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRequest {
    pub url: String,
    /// Identifier of the document context the request originated from.
    pub frame_id: String,
    pub timing: Option<RequestTiming>,
}
