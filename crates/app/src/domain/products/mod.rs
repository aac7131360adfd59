//! Products

pub mod errors;
pub mod metrics;
pub mod models;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
