//! climiq - Climate data API client with mock fallback.
//!
//! Unified access to six public climate/weather/economic APIs
//! (ClimateTRACE, Carbon Interface, OpenWeatherMap, NASA POWER,
//! World Bank, UN SDG). Every call is classified into an outcome and,
//! depending on the fallback mode, failed calls are answered with
//! structurally valid synthetic data instead of errors.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod mock;
pub mod providers;
pub mod util;

pub use self::config::Config;
pub use self::core::client::{ClimateClient, FetchMode};
pub use self::core::health::{HealthReport, ProbeReport};
pub use self::core::models::{ApiResponse, CallOutcome, DataOrigin, Params, Payload};
pub use self::core::provider::{Endpoint, Provider};
pub use self::core::stats::{RunningStats, StatsSnapshot};
pub use self::error::{ClimiqError, ExitCode, Result};
