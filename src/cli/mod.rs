//! CLI commands.
//!
//! Each subcommand lives in its own module with an `execute` entry point.

pub mod args;
pub mod estimate;
pub mod fetch;
pub mod health;
pub mod suite;

pub use args::{Cli, Commands, OutputFormat};

use crate::config::Config;
use crate::core::client::{ClimateClient, FetchMode};
use crate::error::Result;

/// Build the client from configuration plus global CLI overrides.
pub fn build_client(cli: &Cli) -> Result<ClimateClient> {
    let mut config = Config::load()?;
    if let Some(timeout) = cli.timeout {
        config.general.timeout_seconds = timeout;
    }
    let mode = match cli.mode.as_deref() {
        Some(raw) => raw.parse::<FetchMode>()?,
        None => config.general.mode,
    };
    ClimateClient::with_mode(config, mode)
}

/// Serialize a value as JSON, pretty or compact.
pub(crate) fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
