//! Remote query error types.

use thiserror::Error;

/// Failures from the remote query path.
///
/// Every lower-level failure (transport, HTTP status, body decoding) is
/// wrapped into one of these at its origin; `Display` is the human-readable
/// message surfaced to the host.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The service answered with a non-2xx status; the message comes from
    /// its error body.
    #[error("{0}")]
    Api(String),

    /// The request never completed (DNS, connect, read failures).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered 2xx but the body did not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
