//! Stockroom CLI

use std::{io, process};

use clap::Parser;
use stockroom_app::render::{AlertKind, write_alert};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_error| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        let _written = write_alert(io::stderr().lock(), AlertKind::Error, &error);
        process::exit(1);
    }
}
