//! Shared inventory client: session handling, identity provider glue,
//! authenticated API access, domain services and terminal rendering.

pub mod api;
pub mod context;
pub mod domain;
pub mod oauth;
pub mod render;
pub mod session;

#[cfg(test)]
mod test;
