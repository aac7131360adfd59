//! Identity provider glue for the authorization-code flow.

mod callback;
mod config;
mod errors;
mod provider;

pub use callback::*;
pub use config::*;
pub use errors::*;
pub use provider::*;
