use std::{fmt, io};

use clap::{Parser, Subcommand};
use stockroom_app::{
    context::{AppConfig, AppContext},
    render::{AlertKind, write_alert},
};

mod auth;
mod movements;
mod products;
mod reports;

#[derive(Debug, Parser)]
#[command(name = "stockroom", about = "Inventory management CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in through the hosted identity provider
    Login(auth::LoginArgs),

    /// Forget the stored session
    Logout(auth::LogoutArgs),

    /// Inspect the stored session
    Session(auth::SessionCommand),

    Products(products::ProductsCommand),
    Movements(movements::MovementsCommand),
    Reports(reports::ReportsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Login(args) => auth::login(args).await,
            Commands::Logout(args) => auth::logout(&args),
            Commands::Session(command) => auth::run(command),
            Commands::Products(command) => products::run(command).await,
            Commands::Movements(command) => movements::run(command).await,
            Commands::Reports(command) => reports::run(command).await,
        }
    }
}

fn context(config: &AppConfig) -> Result<AppContext, String> {
    AppContext::from_config(config).map_err(|error| format!("failed to start: {error}"))
}

/// Error message prefixed with what was being attempted.
fn failed<E: fmt::Display>(action: &'static str) -> impl FnOnce(E) -> String {
    move |error| format!("failed to {action}: {error}")
}

fn success(message: &str) -> Result<(), String> {
    write_alert(io::stdout().lock(), AlertKind::Success, message).map_err(|error| error.to_string())
}

fn info(message: &str) -> Result<(), String> {
    write_alert(io::stdout().lock(), AlertKind::Info, message).map_err(|error| error.to_string())
}
