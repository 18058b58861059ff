//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep failure
//! classes explicit: validation problems are record-scoped and never
//! retried, API problems carry a retryability class, parse problems
//! degrade instead of propagating, and configuration problems are the
//! only class allowed to stop the process (before any record is touched).

use thiserror::Error;

/// Classification of an external API failure.
///
/// Both the search and model boundaries map their transport and HTTP
/// failures onto this one enum so the retry policy has a single place
/// to decide what is worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Empty or otherwise unusable query; no request was made.
    InvalidQuery,
    /// Request exceeded the per-attempt timeout.
    Timeout,
    /// Could not establish a connection.
    ConnectionFailed,
    /// HTTP 401: bad or missing credentials.
    Unauthorized,
    /// HTTP 429: provider rate limit.
    RateLimited,
    /// HTTP 5xx: provider-side fault.
    ServerError,
    /// HTTP 400: request the provider refused to parse.
    MalformedRequest,
    /// Any other non-2xx status.
    Unknown(u16),
}

impl ApiErrorKind {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Exactly `Timeout`, `ConnectionFailed`, `RateLimited` and
    /// `ServerError` are transient; everything else fails immediately.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ApiErrorKind::Timeout
                | ApiErrorKind::ConnectionFailed
                | ApiErrorKind::RateLimited
                | ApiErrorKind::ServerError
        )
    }

    /// Map an HTTP status code onto a failure class.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::MalformedRequest,
            401 => ApiErrorKind::Unauthorized,
            429 => ApiErrorKind::RateLimited,
            500..=599 => ApiErrorKind::ServerError,
            other => ApiErrorKind::Unknown(other),
        }
    }

    /// Map a reqwest transport error onto a failure class.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiErrorKind::Timeout
        } else {
            ApiErrorKind::ConnectionFailed
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::InvalidQuery => write!(f, "invalid query"),
            ApiErrorKind::Timeout => write!(f, "request timed out"),
            ApiErrorKind::ConnectionFailed => write!(f, "connection failed"),
            ApiErrorKind::Unauthorized => write!(f, "unauthorized (check API key)"),
            ApiErrorKind::RateLimited => write!(f, "rate limit exceeded"),
            ApiErrorKind::ServerError => write!(f, "server error"),
            ApiErrorKind::MalformedRequest => write!(f, "malformed request"),
            ApiErrorKind::Unknown(status) => write!(f, "unexpected status {status}"),
        }
    }
}

/// A failed call to an external API, with attempt accounting.
#[derive(Debug, Error)]
#[error("API call failed after {attempts} attempt(s): {message}")]
pub struct ApiError {
    /// Failure class of the final attempt.
    pub kind: ApiErrorKind,
    /// Human-readable root cause.
    pub message: String,
    /// How many attempts were made before giving up.
    pub attempts: u32,
}

impl ApiError {
    /// A single-attempt failure (not yet through the retry wrapper).
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            attempts: 1,
        }
    }
}

/// Errors that can occur during enrichment operations.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Bad or missing input; record-scoped and never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// Search or model call failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Decode or coerce failure; always degrades rather than propagates.
    #[error("data processing error: {0}")]
    DataProcessing(String),

    /// Missing or invalid setup; fatal at process start only.
    #[error("configuration error: {0}")]
    Config(String),
}

impl EnrichError {
    /// Whether the retry wrapper should try again.
    pub fn is_transient(&self) -> bool {
        matches!(self, EnrichError::Api(api) if api.kind.is_transient())
    }
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichError>;
