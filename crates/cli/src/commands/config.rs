//! Configuration loading and the `config` command.
//!
//! # Environment Variables
//!
//! Without `--config`, overrides come from `SHOPFRONT_*` variables (and a
//! `.env` file if present). See `shopfront_page::config`.

use std::path::Path;

use shopfront_page::PageConfig;

use super::{CliError, read_file};

/// Load configuration from a JSON file, or from the environment.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the configuration is
/// invalid.
pub fn load(path: Option<&Path>) -> Result<PageConfig, CliError> {
    let config = match path {
        Some(path) => PageConfig::from_json(&read_file(path)?)?,
        None => PageConfig::from_env()?,
    };
    tracing::debug!(?config, "Loaded page configuration");
    Ok(config)
}

/// Print `config` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
#[allow(clippy::print_stdout)]
pub fn print(config: &PageConfig) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(config).map_err(CliError::Output)?;
    println!("{json}");
    Ok(())
}
