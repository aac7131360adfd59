//! Reports service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("{0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Api(#[from] ApiError),
}
