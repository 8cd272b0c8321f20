//! Errors surfaced by the forecast service client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from talking to the forecast service.
///
/// `Request` means the server explicitly rejected the call; its message is
/// the response body verbatim so server-side diagnostics survive intact.
/// `Transport` and `Decode` mean the request never completed cleanly.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. Displays as the body text alone.
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose body did not decode as the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build the rejection error for a non-2xx response.
    ///
    /// Empty bodies fall back to the numeric status so the user always
    /// sees something actionable.
    pub fn rejection(status: StatusCode, body: String) -> Self {
        let message = if body.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            body
        };
        ApiError::Request { status, message }
    }
}
