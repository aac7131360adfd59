//! Authenticated access to the inventory REST API.

mod client;
mod errors;
pub mod loose;
pub mod shape;
mod transport;

pub use client::*;
pub use errors::*;
pub use transport::*;
