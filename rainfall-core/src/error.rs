//! Errors raised at the data fetch boundary.

use thiserror::Error;

/// Why a prediction fetch produced no records.
///
/// Every variant aborts the refresh cycle; none of them touch the chart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request never produced a response (network down, CORS, DNS...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not a JSON array of prediction records.
    #[error("invalid prediction payload: {0}")]
    Decode(String),

    /// The host environment has no way to issue requests (no `window`).
    #[error("fetch unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
