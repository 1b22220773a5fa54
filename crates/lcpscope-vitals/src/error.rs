//! Core error taxonomy.

use thiserror::Error;

/// Errors from the attribution engine and its page-context sampling.
#[derive(Debug, Error)]
pub enum VitalsError {
    /// The page never produced a qualifying render candidate. Terminal and
    /// expected: the run cannot produce an LCP attribution, which is
    /// distinct from a successful-but-empty result.
    #[error("no render candidate was observed for this page")]
    NoRenderCandidate,

    /// Sampling the page context failed (session closed, evaluation error).
    /// Propagates unhandled; the engine does not recover a session it does
    /// not own.
    #[error("page context error: {0}")]
    Page(String),
}
