//! Shopfront CLI - run storefront page behaviors outside a browser.
//!
//! # Usage
//!
//! ```bash
//! # Load a page fixture, attach the behaviors, and replay a script
//! sf-page run --page cart.json --script steps.json
//!
//! # Use a JSON configuration instead of environment variables
//! sf-page run --page cart.json --script steps.json --config page-config.json
//!
//! # Print the effective configuration
//! sf-page config
//! ```
//!
//! # Commands
//!
//! - `run` - Replay user actions against a page and print the result as JSON
//! - `config` - Print the effective configuration as JSON
//!
//! Logs go to stderr; set `RUST_LOG` to change the level.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sf-page")]
#[command(author, version, about = "Storefront page behavior runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script of user actions against a page fixture
    Run {
        /// Page fixture (JSON)
        #[arg(short, long)]
        page: PathBuf,

        /// Steps to replay (JSON array); omit to only load the page
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Page configuration (JSON); defaults come from the environment
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the effective page configuration
    Config {
        /// Page configuration (JSON); defaults come from the environment
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    // Defaults to info level for the page crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_page=info,sf_page=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Run {
            page,
            script,
            config,
        } => {
            let config = commands::config::load(config.as_deref())?;
            commands::run::run(&page, script.as_deref(), config)?;
        }
        Commands::Config { config } => {
            let config = commands::config::load(config.as_deref())?;
            commands::config::print(&config)?;
        }
    }
    Ok(())
}
