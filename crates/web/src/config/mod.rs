//! Server configuration module

use clap::Parser;
use stockroom_app::oauth::OAuthConfig;

use crate::config::{
    assets::AssetsConfig, observability::LoggingConfig, server::ServerRuntimeConfig,
};

pub(crate) mod assets;
pub(crate) mod observability;
pub(crate) mod server;

/// Stockroom web server configuration
#[derive(Debug, Parser)]
#[command(
    name = "stockroom-web",
    about = "Stockroom static and sign-in callback server",
    long_about = None
)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Static asset settings.
    #[command(flatten)]
    pub assets: AssetsConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub oauth: OAuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
