//! Token endpoints.

pub(crate) mod exchange;
pub(crate) mod log;
