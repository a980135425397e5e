//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};

/// climiq - Climate data API client with mock fallback.
#[derive(Parser, Debug)]
#[command(name = "climiq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Fetch mode (live, mock, hybrid)
    #[arg(long, value_name = "MODE", global = true)]
    pub mode: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective output format.
    #[must_use]
    pub const fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Human,
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe every provider and report overall availability
    Health(HealthArgs),

    /// Exercise every endpoint family once and report per-endpoint results
    Suite(SuiteArgs),

    /// Current weather for a location
    Weather(WeatherArgs),

    /// Per-country emissions over a year range
    Emissions(EmissionsArgs),

    /// Carbon footprint estimate
    #[command(subcommand)]
    Estimate(EstimateCommand),
}

/// Arguments for the `health` command.
#[derive(Parser, Debug)]
pub struct HealthArgs {
    /// Also print the call statistics accumulated by the probes
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the `suite` command.
#[derive(Parser, Debug)]
pub struct SuiteArgs {
    /// Only exercise specific provider(s)
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<Vec<String>>,
}

/// Arguments for the `weather` command.
#[derive(Parser, Debug)]
pub struct WeatherArgs {
    /// Location as "City,CC"
    #[arg(value_name = "LOCATION", default_value = "New York,US")]
    pub location: String,
}

/// Arguments for the `emissions` command.
#[derive(Parser, Debug)]
pub struct EmissionsArgs {
    /// Comma-separated ISO3 country codes
    #[arg(long, value_name = "CODES", value_delimiter = ',')]
    pub countries: Vec<String>,

    /// First year of the range (inclusive)
    #[arg(long, default_value = "2022")]
    pub since: i64,

    /// Last year of the range (inclusive)
    #[arg(long, default_value = "2022")]
    pub to: i64,
}

/// Carbon estimate activities.
#[derive(Subcommand, Debug)]
pub enum EstimateCommand {
    /// Electricity consumption estimate
    Electricity {
        /// Consumption value
        #[arg(long)]
        value: f64,
        /// Unit (kwh or mwh)
        #[arg(long, default_value = "kwh")]
        unit: String,
        /// Lowercase ISO2 country code
        #[arg(long, default_value = "us")]
        country: String,
    },
    /// Vehicle travel estimate
    Vehicle {
        /// Distance travelled
        #[arg(long)]
        distance: f64,
        /// Unit (km or mi)
        #[arg(long, default_value = "km")]
        unit: String,
    },
    /// Flight estimate
    Flight {
        /// Number of passengers
        #[arg(long, default_value = "1")]
        passengers: u32,
        /// Legs as "DEP:DST", repeatable
        #[arg(long = "leg", value_name = "DEP:DST")]
        legs: Vec<String>,
    },
    /// Shipping estimate
    Shipping {
        /// Shipment weight
        #[arg(long)]
        weight: f64,
        /// Weight unit
        #[arg(long = "weight-unit", default_value = "kg")]
        weight_unit: String,
        /// Distance shipped
        #[arg(long)]
        distance: f64,
        /// Distance unit
        #[arg(long = "distance-unit", default_value = "km")]
        distance_unit: String,
        /// Transport method (truck, ship, plane, train)
        #[arg(long, default_value = "truck")]
        method: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_overrides_format() {
        let cli = Cli::parse_from(["climiq", "--json", "health"]);
        assert_eq!(cli.effective_format(), OutputFormat::Json);
    }

    #[test]
    fn emissions_countries_split_on_commas() {
        let cli = Cli::parse_from(["climiq", "emissions", "--countries", "USA,CHN"]);
        let Some(Commands::Emissions(args)) = cli.command else {
            panic!("expected emissions command");
        };
        assert_eq!(args.countries, vec!["USA".to_string(), "CHN".to_string()]);
        assert_eq!(args.since, 2022);
    }

    #[test]
    fn estimate_electricity_parses() {
        let cli = Cli::parse_from([
            "climiq",
            "estimate",
            "electricity",
            "--value",
            "100",
            "--country",
            "de",
        ]);
        let Some(Commands::Estimate(EstimateCommand::Electricity { value, country, .. })) =
            cli.command
        else {
            panic!("expected electricity estimate");
        };
        assert!((value - 100.0).abs() < f64::EPSILON);
        assert_eq!(country, "de");
    }
}
