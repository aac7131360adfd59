//! OAuth Errors

use reqwest::StatusCode;
use thiserror::Error;

use crate::session::StoreError;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("identity provider domain cannot hold a path: {0}")]
    BaseUrl(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint answered {status}: {body}")]
    TokenRejected { status: StatusCode, body: String },

    #[error("metadata endpoint answered {status}")]
    Metadata { status: StatusCode },
}

#[derive(Debug, Error)]
pub enum CallbackError {
    /// The provider redirected back with an error instead of a code.
    #[error("{error}: {description}")]
    Provider { error: String, description: String },

    #[error("no authorization code received")]
    MissingCode,

    #[error("token exchange failed: {0}")]
    Exchange(#[source] OAuthError),

    #[error("failed to store session: {0}")]
    Session(#[from] StoreError),

    #[error("invalid callback URL: {0}")]
    Url(#[from] url::ParseError),
}
