//! # CLI
//!
//! Command-line entry point. `serve` loads configuration, initializes
//! tracing and runs the HTTP server on a tokio runtime; `main.rs` stays
//! logic-free.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::http::HttpServer;

/// Stackpilot - product landing site and user API
#[derive(Parser, Debug)]
#[command(name = "stackpilot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

/// CLI errors; all are fatal to the process
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Parse arguments and dispatch
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

fn serve(config_path: Option<&Path>, port: Option<u16>) -> Result<(), CliError> {
    init_tracing();

    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(HttpServer::new(config).start())?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
