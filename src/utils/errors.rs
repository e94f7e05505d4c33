use thiserror::Error;

/// Failures of the identity provider round trips.
///
/// Display strings are shown to the user verbatim in the blocking notice.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no Google client id configured")]
    NotConfigured,

    #[error("sign-in was cancelled or denied ({0})")]
    Denied(String),

    #[error("sign-in was cancelled")]
    Cancelled,

    #[error("timed out waiting for the browser sign-in")]
    Timeout,

    #[error("sign-in response did not match this request")]
    StateMismatch,

    #[error("invalid sign-in callback: {0}")]
    Callback(String),

    #[error("could not open the browser: {0}")]
    Browser(String),

    #[error("token endpoint rejected the request: {0}")]
    Token(String),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected response: {0}")]
    Json(#[from] serde_json::Error),
}
