// src/error.rs
//! Failure taxonomy for talking to the upstream news API.
//!
//! Only fetching can fail. Empty results and slug misses are ordinary
//! values (`Vec::is_empty`, `Option::None`), and the text/image/date
//! helpers in [`crate::normalize`] degrade to safe defaults instead of
//! returning errors.

/// Why a feed snapshot could not be produced.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, body read error...
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status code.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// The body arrived but is not the expected JSON envelope.
    #[error("upstream payload could not be decoded: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None if e.is_decode() => FetchError::Decode(e.to_string()),
            None => FetchError::Transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
