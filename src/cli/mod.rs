//! Command-line interface

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::util::TryInitError;

use timehouse::{session::Session, storage::FileStorage};

mod cart;
mod catalog;
mod config;
mod logging;
mod settings;

use config::{LoggingConfig, StorageConfig};

/// Timehouse storefront CLI
#[derive(Debug, Parser)]
#[command(name = "timehouse", about = "Timehouse storefront CLI", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    logging: LoggingConfig,

    /// Persisted state settings.
    #[command(flatten)]
    storage: StorageConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the watch catalog
    Catalog,

    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(cart::CartCommand),

    /// Inspect or change preferences
    #[command(subcommand)]
    Settings(settings::SettingsCommand),
}

impl Cli {
    /// Load configuration from `.env`, environment and arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn init_logging(&self) -> Result<(), TryInitError> {
        logging::init_subscriber(&self.logging)
    }

    pub(crate) fn run(self) -> Result<(), String> {
        let storage = Arc::new(FileStorage::new(&self.storage.data_dir));

        let mut session = Session::open(storage)
            .map_err(|error| format!("failed to open session: {error}"))?;

        match self.command {
            Commands::Catalog => catalog::run(&session),
            Commands::Cart(command) => cart::run(command, &mut session),
            Commands::Settings(command) => settings::run(command, &mut session),
        }
    }
}
