//! Closed error kinds that callers branch on.
//!
//! Everything else propagates as [`anyhow::Error`].

use axum::http::StatusCode;
use thiserror::Error;

/// Reasons a webhook request fails authentication.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The `x-line-signature` header is absent or not valid ASCII.
    #[error("signature header is missing")]
    Missing,
    /// The header is present but is not valid base64.
    #[error("signature header is not valid base64")]
    Malformed,
    /// The signature does not match the body.
    #[error("signature does not match the request body")]
    Mismatch,
    /// The channel secret cannot be used as an HMAC key.
    #[error("channel secret is not a usable HMAC key")]
    InvalidSecret,
}

impl SignatureError {
    /// Authenticity failures are the caller's fault; anything else is ours.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Missing | Self::Malformed | Self::Mismatch => StatusCode::BAD_REQUEST,
            Self::InvalidSecret => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Reasons a page title could not be extracted.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The page answered with a non-success status.
    #[error("page responded with status {0}")]
    Status(reqwest::StatusCode),
    /// The page body is larger than the configured ceiling.
    #[error("page body exceeds {limit} bytes")]
    TooLarge {
        /// The ceiling, in bytes.
        limit: usize,
    },
    /// The page has no usable `<title>` element.
    #[error("unable to locate title on the page")]
    TitleNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_status_mapping() {
        assert_eq!(SignatureError::Missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(SignatureError::Malformed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(SignatureError::Mismatch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(SignatureError::InvalidSecret.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
