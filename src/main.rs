//! climiq - Climate data API client.
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use clap::Parser;

use climiq::cli::{Cli, Commands};
use climiq::core::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .as_deref()
        .and_then(logging::LogLevel::from_arg)
        .or_else(logging::level_from_env)
        .unwrap_or_default();
    let log_format = logging::format_from_env().unwrap_or_default();
    logging::init(log_level, log_format, logging::log_file_from_env(), cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::from(i32::from(e.exit_code()) as u8)
        }
    }
}

async fn run(cli: Cli) -> climiq::Result<()> {
    match &cli.command {
        None => {
            print_quickstart();
            Ok(())
        }
        Some(Commands::Health(args)) => climiq::cli::health::execute(args, &cli).await,
        Some(Commands::Suite(args)) => climiq::cli::suite::execute(args, &cli).await,
        Some(Commands::Weather(args)) => climiq::cli::fetch::weather(args, &cli).await,
        Some(Commands::Emissions(args)) => climiq::cli::fetch::emissions(args, &cli).await,
        Some(Commands::Estimate(command)) => climiq::cli::estimate::execute(command, &cli).await,
    }
}

/// Print quickstart help when no command is given.
fn print_quickstart() {
    println!(
        r#"climiq - Climate data API client with mock fallback

Unified access to ClimateTRACE, Carbon Interface, OpenWeatherMap,
NASA POWER, World Bank, and UN SDG data.

USAGE:
    climiq [OPTIONS] <COMMAND>

COMMANDS:
    health      Probe every provider and report overall availability
    suite       Exercise every endpoint family once
    weather     Current weather for a location
    emissions   Per-country emissions over a year range
    estimate    Carbon footprint estimate

QUICK START:
    climiq health                         # Probe all six providers
    climiq suite --mode mock              # Full battery, offline
    climiq weather "Berlin,DE"            # Current conditions
    climiq emissions --countries USA,CHN --since 2021 --to 2022
    climiq estimate electricity --value 100 --country us

ROBOT MODE:
    climiq health --json                  # JSON output
    climiq suite --json --pretty          # Pretty JSON

For more help: climiq --help
"#
    );
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}
