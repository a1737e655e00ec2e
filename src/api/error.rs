use thiserror::Error;

/// Errors surfaced by the API client.
///
/// Nothing here is fatal to the process; every variant is recoverable by
/// re-navigation. `SessionExpired` is the library's rendering of the SPA's
/// "redirect to login": by the time the caller sees it, the persisted
/// session has already been cleared.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("session expired, sign in again")]
    SessionExpired,
    #[error("not found")]
    NotFound,
    #[error("backend rejected request: {0}")]
    Backend(String),
    #[error("malformed response: {0}")]
    Decode(String),
}
