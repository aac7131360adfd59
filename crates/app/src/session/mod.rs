//! Session

mod errors;
pub mod jwt;
mod models;
mod service;
mod store;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use store::*;
