// src/errors.rs
use thiserror::Error;

/// Failure taxonomy of the search engine.
///
/// A malformed pagination cursor is not represented here: the codec treats
/// any undecodable token as "no cursor" and the request proceeds from the
/// first page.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The listings store could not serve the range scan. Surfaced to the
    /// caller as a single generic failure; never retried inside the engine.
    #[error("listings store unavailable: {0}")]
    StoreUnavailable(String),

    /// The employer directory could not resolve the referenced ids. Always
    /// swallowed by the result assembler, which degrades to an empty map.
    #[error("employer lookup failed: {0}")]
    EmployerLookupFailed(String),
}
