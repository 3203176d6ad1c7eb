use thiserror::Error;

// ---------------------------------------------------------------------------
// GatewayError
// ---------------------------------------------------------------------------

/// Failure at the platform API boundary. Every request helper funnels
/// transport, status, and decode problems through this type.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// HTTP 412 — the `If-Match` concurrency token no longer names the
    /// server's current version of the record.
    #[error("Concurrency token rejected for {url}")]
    PreconditionFailed { url: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Concurrency token for {url} is not a valid header value")]
    InvalidToken { url: String },
}

impl GatewayError {
    /// HTTP status code, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::PreconditionFailed { .. } => Some(412),
            GatewayError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for stale-concurrency-token rejections.
    pub fn is_conflict(&self) -> bool {
        matches!(self, GatewayError::PreconditionFailed { .. })
    }
}

/// Convenience alias — the default error type is `GatewayError`.
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
