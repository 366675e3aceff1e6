//! Error taxonomy shared by providers, the aggregation engine and the web layer

/// Errors surfaced by search and lookup operations.
///
/// A call yields either a complete (or timeout-bounded) result or exactly one
/// of these errors, never both.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The provider could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a status that does not mean "no results".
    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16 },

    /// The provider has no record for the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// A lookup finished without producing a single record.
    #[error("no extended info found: {0}")]
    EmptyResult(String),

    /// Provider markup could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// Out-of-range request parameters or an unknown provider.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The caller cancelled the operation while it was in flight.
    #[error("operation cancelled")]
    Cancelled,

    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// True for the "provider has nothing" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::EmptyResult(_))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, SearchError>;
