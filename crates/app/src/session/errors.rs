//! Session Errors

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access session file: {0}")]
    Io(#[source] io::Error),

    #[error("session file is corrupt: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("session store lock was poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not signed in")]
    NoToken,

    #[error("session expired, sign in again")]
    Expired,

    #[error(transparent)]
    Store(#[from] StoreError),
}
