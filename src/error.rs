//! Network error type shared by every endpoint call.

/// Failure of a request to one of the portal's endpoints.
///
/// Peripheral callers (auth probe, logout) log these and carry on; none is
/// shown to the user or retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("unexpected status: {0}")]
    Status(u16),
    /// The body was not the JSON shape we expected.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
