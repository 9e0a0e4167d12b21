use thiserror::Error;

/// Failure of a single call against the sports-data provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("resource not found")]
    NotFound,

    #[error("http {status}: {snippet}")]
    Status { status: u16, snippet: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Why a team's recent history could not be fetched.
///
/// Kept separate from an empty history so callers can tell "throttled"
/// apart from "this team has no finished matches".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("team history unavailable: {0}")]
    Unavailable(String),
}

impl From<FetchError> for HistoryError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::RateLimited => HistoryError::RateLimited,
            other => HistoryError::Unavailable(other.to_string()),
        }
    }
}
