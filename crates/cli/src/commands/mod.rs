//! CLI subcommands.

pub mod config;
pub mod run;

use std::path::{Path, PathBuf};

use shopfront_page::{ConfigError, PageError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The step script is not valid JSON.
    #[error("Invalid script: {0}")]
    Script(serde_json::Error),

    /// The result could not be serialized.
    #[error("Cannot serialize output: {0}")]
    Output(serde_json::Error),

    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The page rejected a step.
    #[error(transparent)]
    Page(#[from] PageError),
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
