//! Stock Movements

pub mod errors;
pub mod models;
pub mod service;

pub use errors::MovementsServiceError;
pub use service::*;
