//! API Errors

use reqwest::StatusCode;
use thiserror::Error;

use crate::{api::transport::TransportError, session::SessionError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("session expired, sign in again")]
    SessionExpired,

    #[error("base URL cannot hold a path: {0}")]
    BaseUrl(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the user has to sign in again before retrying.
    #[must_use]
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            Self::SessionExpired | Self::Session(SessionError::NoToken | SessionError::Expired)
        )
    }
}
