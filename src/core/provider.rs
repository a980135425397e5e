//! Provider and endpoint descriptors.
//!
//! Defines the six supported data sources and their endpoint families.
//! Dispatch throughout the crate is keyed on these enums rather than on
//! substring matches against URLs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClimiqError, Result};

// =============================================================================
// Provider Enum
// =============================================================================

/// Supported climate/weather/economic data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// ClimateTRACE emissions catalog (public, no auth).
    ClimateTrace,
    /// Carbon Interface footprint estimates (bearer token).
    CarbonInterface,
    /// OpenWeatherMap current conditions and air quality (API key).
    OpenWeather,
    /// NASA POWER solar/wind daily telemetry (API key optional).
    NasaPower,
    /// World Bank indicator time series (public, no auth).
    WorldBank,
    /// UN SDG goal/target catalog (public, no auth).
    UnSdg,
}

/// How a provider authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    /// No credential needed.
    Public,
    /// `Authorization: Bearer <token>` header; absent token forces mock data.
    BearerToken,
    /// `appid=<key>` query parameter; absent key forces mock data.
    QueryKey,
    /// `api_key=<key>` query parameter; optional, live calls work without it.
    OptionalQueryKey,
}

impl Provider {
    /// All providers in display order.
    pub const ALL: &'static [Self] = &[
        Self::ClimateTrace,
        Self::CarbonInterface,
        Self::OpenWeather,
        Self::NasaPower,
        Self::WorldBank,
        Self::UnSdg,
    ];

    /// CLI name for this provider.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::ClimateTrace => "climatetrace",
            Self::CarbonInterface => "carboninterface",
            Self::OpenWeather => "openweather",
            Self::NasaPower => "nasapower",
            Self::WorldBank => "worldbank",
            Self::UnSdg => "unsdg",
        }
    }

    /// Display name for human output.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ClimateTrace => "ClimateTRACE",
            Self::CarbonInterface => "Carbon Interface",
            Self::OpenWeather => "OpenWeatherMap",
            Self::NasaPower => "NASA POWER",
            Self::WorldBank => "World Bank",
            Self::UnSdg => "UN SDG",
        }
    }

    /// Parse from CLI argument.
    pub fn from_cli_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        Self::ALL
            .iter()
            .find(|p| p.cli_name() == lower)
            .copied()
            .ok_or_else(|| ClimiqError::InvalidProvider(name.to_string()))
    }

    /// How this provider authenticates.
    #[must_use]
    pub const fn auth_kind(self) -> AuthKind {
        match self {
            Self::ClimateTrace | Self::WorldBank | Self::UnSdg => AuthKind::Public,
            Self::CarbonInterface => AuthKind::BearerToken,
            Self::OpenWeather => AuthKind::QueryKey,
            Self::NasaPower => AuthKind::OptionalQueryKey,
        }
    }

    /// Whether a missing credential forces mock substitution for this provider.
    #[must_use]
    pub const fn requires_credential(self) -> bool {
        matches!(self.auth_kind(), AuthKind::BearerToken | AuthKind::QueryKey)
    }

    /// Default timeout for this provider's requests.
    #[must_use]
    pub const fn default_timeout(self) -> Duration {
        match self {
            // NASA POWER aggregates daily grids and is the slowest of the set
            Self::NasaPower => Duration::from_secs(15),
            Self::CarbonInterface | Self::OpenWeather | Self::WorldBank | Self::UnSdg => {
                Duration::from_secs(10)
            }
            Self::ClimateTrace => Duration::from_secs(30),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// Endpoint Families
// =============================================================================

/// One endpoint family of one provider.
///
/// Every outbound call and every mock generator is keyed on a variant of
/// this enum; the mapping is resolved once when the client is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    // ClimateTRACE
    Sectors,
    Countries,
    Subsectors,
    Continents,
    Gases,
    Groups,
    AssetSearch,
    AssetEmissions,
    CountryEmissions,
    AdminSearch,
    AdminGeometry,
    // Carbon Interface
    CarbonEstimate,
    // OpenWeatherMap
    CurrentWeather,
    AirQuality,
    // NASA POWER
    PowerDaily,
    // World Bank
    Indicator,
    // UN SDG
    SdgGoals,
    SdgTargets,
}

impl Endpoint {
    /// All endpoint families, grouped by provider.
    pub const ALL: &'static [Self] = &[
        Self::Sectors,
        Self::Countries,
        Self::Subsectors,
        Self::Continents,
        Self::Gases,
        Self::Groups,
        Self::AssetSearch,
        Self::AssetEmissions,
        Self::CountryEmissions,
        Self::AdminSearch,
        Self::AdminGeometry,
        Self::CarbonEstimate,
        Self::CurrentWeather,
        Self::AirQuality,
        Self::PowerDaily,
        Self::Indicator,
        Self::SdgGoals,
        Self::SdgTargets,
    ];

    /// The provider this endpoint belongs to.
    #[must_use]
    pub const fn provider(self) -> Provider {
        match self {
            Self::Sectors
            | Self::Countries
            | Self::Subsectors
            | Self::Continents
            | Self::Gases
            | Self::Groups
            | Self::AssetSearch
            | Self::AssetEmissions
            | Self::CountryEmissions
            | Self::AdminSearch
            | Self::AdminGeometry => Provider::ClimateTrace,
            Self::CarbonEstimate => Provider::CarbonInterface,
            Self::CurrentWeather | Self::AirQuality => Provider::OpenWeather,
            Self::PowerDaily => Provider::NasaPower,
            Self::Indicator => Provider::WorldBank,
            Self::SdgGoals | Self::SdgTargets => Provider::UnSdg,
        }
    }

    /// Short label used in logs and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sectors => "sectors",
            Self::Countries => "countries",
            Self::Subsectors => "subsectors",
            Self::Continents => "continents",
            Self::Gases => "gases",
            Self::Groups => "groups",
            Self::AssetSearch => "asset_search",
            Self::AssetEmissions => "asset_emissions",
            Self::CountryEmissions => "country_emissions",
            Self::AdminSearch => "admin_search",
            Self::AdminGeometry => "admin_geometry",
            Self::CarbonEstimate => "carbon_estimate",
            Self::CurrentWeather => "current_weather",
            Self::AirQuality => "air_quality",
            Self::PowerDaily => "power_daily",
            Self::Indicator => "indicator",
            Self::SdgGoals => "sdg_goals",
            Self::SdgTargets => "sdg_targets",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
