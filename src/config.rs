//! Configuration loading and management.
//!
//! Loads configuration from:
//! - Linux/macOS: `~/.config/climiq/config.toml`
//! - Windows: `%APPDATA%/climiq/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `CARBON_INTERFACE_API_KEY`: Carbon Interface bearer token
//! - `OPENWEATHER_API_KEY`: OpenWeatherMap API key
//! - `NASA_API_KEY`: NASA POWER API key (optional)
//! - `CLIMIQ_TIMEOUT`: Default timeout in seconds
//! - `CLIMIQ_MODE`: Fetch mode (live, mock, hybrid)
//! - `CLIMIQ_CONFIG`: Override config file path

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::client::FetchMode;
use crate::core::provider::Provider;
use crate::error::{ClimiqError, Result};

/// Environment variable for the Carbon Interface bearer token.
pub const ENV_CARBON_INTERFACE_KEY: &str = "CARBON_INTERFACE_API_KEY";
/// Environment variable for the OpenWeatherMap API key.
pub const ENV_OPENWEATHER_KEY: &str = "OPENWEATHER_API_KEY";
/// Environment variable for the NASA POWER API key.
pub const ENV_NASA_KEY: &str = "NASA_API_KEY";
/// Environment variable for timeout in seconds.
pub const ENV_TIMEOUT: &str = "CLIMIQ_TIMEOUT";
/// Environment variable for the fetch mode.
pub const ENV_MODE: &str = "CLIMIQ_MODE";
/// Environment variable to override the config file path.
pub const ENV_CONFIG: &str = "CLIMIQ_CONFIG";

// =============================================================================
// Config Sections
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Per-provider base URLs.
    pub endpoints: EndpointsConfig,
    /// API credentials.
    pub credentials: CredentialsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default timeout for network requests in seconds.
    pub timeout_seconds: u64,
    /// Fetch mode: live, mock, or hybrid.
    pub mode: FetchMode,
}

/// Base URLs for all six providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub climate_trace: String,
    pub carbon_interface: String,
    pub open_weather: String,
    pub nasa_power: String,
    pub world_bank: String,
    pub un_sdg: String,
}

/// Optional API credentials. Providers whose credential is absent are
/// served from the mock catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub carbon_interface_api_key: Option<String>,
    pub open_weather_api_key: Option<String>,
    pub nasa_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            endpoints: EndpointsConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: crate::core::http::DEFAULT_TIMEOUT.as_secs(),
            mode: FetchMode::Hybrid,
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            climate_trace: "https://api.climatetrace.org/v6".to_string(),
            carbon_interface: "https://www.carboninterface.com/api/v1".to_string(),
            open_weather: "https://api.openweathermap.org/data/2.5".to_string(),
            nasa_power: "https://power.larc.nasa.gov/api/temporal".to_string(),
            world_bank: "https://api.worldbank.org/v2".to_string(),
            un_sdg: "https://unstats.un.org/SDGAPI/v1".to_string(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl Config {
    /// Load configuration from the default path (respecting the
    /// `CLIMIQ_CONFIG` override) and apply environment variables.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(path) = std::env::var(ENV_CONFIG) {
            Self::load_from(Path::new(&path))?
        } else {
            Self::load_from(&Self::config_path())?
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific path, without the env overlay.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| ClimiqError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Overlay environment variables on top of file/default values.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(ENV_CARBON_INTERFACE_KEY) {
            if !key.is_empty() {
                self.credentials.carbon_interface_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var(ENV_OPENWEATHER_KEY) {
            if !key.is_empty() {
                self.credentials.open_weather_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var(ENV_NASA_KEY) {
            if !key.is_empty() {
                self.credentials.nasa_api_key = Some(key);
            }
        }
        if let Ok(timeout) = std::env::var(ENV_TIMEOUT) {
            if let Ok(seconds) = timeout.parse::<u64>() {
                self.general.timeout_seconds = seconds;
            }
        }
        if let Ok(mode) = std::env::var(ENV_MODE) {
            if let Ok(parsed) = mode.parse::<FetchMode>() {
                self.general.mode = parsed;
            }
        }
    }

    /// Get the default config file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "climiq").map_or_else(
            || PathBuf::from("config.toml"),
            |dirs| dirs.config_dir().join("config.toml"),
        )
    }

    /// Validate configuration values.
    ///
    /// Checks that base URLs are non-empty and the timeout is within
    /// 1-300 seconds.
    pub fn validate(&self) -> Result<()> {
        if self.general.timeout_seconds == 0 || self.general.timeout_seconds > 300 {
            return Err(ClimiqError::Config(
                "Timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        for provider in Provider::ALL {
            if self.base_url(*provider).is_empty() {
                return Err(ClimiqError::Config(format!(
                    "Base URL for {} must not be empty",
                    provider.cli_name()
                )));
            }
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Base URL for a provider, without a trailing slash.
    #[must_use]
    pub fn base_url(&self, provider: Provider) -> &str {
        let raw = match provider {
            Provider::ClimateTrace => &self.endpoints.climate_trace,
            Provider::CarbonInterface => &self.endpoints.carbon_interface,
            Provider::OpenWeather => &self.endpoints.open_weather,
            Provider::NasaPower => &self.endpoints.nasa_power,
            Provider::WorldBank => &self.endpoints.world_bank,
            Provider::UnSdg => &self.endpoints.un_sdg,
        };
        raw.trim_end_matches('/')
    }

    /// Credential for a provider, if one applies and is configured.
    #[must_use]
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::CarbonInterface => self.credentials.carbon_interface_api_key.as_deref(),
            Provider::OpenWeather => self.credentials.open_weather_api_key.as_deref(),
            Provider::NasaPower => self.credentials.nasa_api_key.as_deref(),
            Provider::ClimateTrace | Provider::WorldBank | Provider::UnSdg => None,
        }
    }

    /// Default request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.general.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.timeout_seconds, 30);
        assert_eq!(config.general.mode, FetchMode::Hybrid);
        assert!(config.credentials.carbon_interface_api_key.is_none());
    }

    #[test]
    fn load_missing_file_returns_default() {
        let config = Config::load_from(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.general.timeout_seconds, 30);
    }

    #[test]
    fn load_valid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[general]
timeout_seconds = 60
mode = "mock"

[endpoints]
climate_trace = "http://localhost:9000/v6"

[credentials]
open_weather_api_key = "abc123"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.general.timeout_seconds, 60);
        assert_eq!(config.general.mode, FetchMode::Mock);
        assert_eq!(
            config.base_url(Provider::ClimateTrace),
            "http://localhost:9000/v6"
        );
        // untouched sections fall back to defaults
        assert_eq!(
            config.base_url(Provider::WorldBank),
            "https://api.worldbank.org/v2"
        );
        assert_eq!(config.api_key(Provider::OpenWeather), Some("abc123"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn validate_timeout_bounds() {
        let mut config = Config::default();
        config.general.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.general.timeout_seconds = 301;
        assert!(config.validate().is_err());

        config.general.timeout_seconds = 300;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.endpoints.un_sdg = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let mut config = Config::default();
        config.endpoints.open_weather = "http://localhost:1234/".to_string();
        assert_eq!(config.base_url(Provider::OpenWeather), "http://localhost:1234");
    }

    #[test]
    fn public_providers_have_no_key() {
        let config = Config::default();
        assert!(config.api_key(Provider::ClimateTrace).is_none());
        assert!(config.api_key(Provider::UnSdg).is_none());
    }
}
