//! Products service errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::{api::ApiError, session::StoreError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("{0}")]
    Invalid(&'static str),

    #[error("product not found")]
    NotFound,

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ApiError> for ProductsServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND => Self::NotFound,
            other => Self::Api(other),
        }
    }
}
