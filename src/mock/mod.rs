//! Mock data catalog.
//!
//! Maps each [`Endpoint`] to its generator function once, at construction
//! time. Dispatch is a table lookup, never a substring match against a
//! URL. An endpoint without a registered generator falls back to a
//! generic `{"mock": true, "endpoint": "<unrecognized>"}` payload rather
//! than failing.

use std::collections::HashMap;

use serde_json::json;

use crate::core::models::{Params, Payload};
use crate::core::provider::Endpoint;
use crate::error::Result;
use crate::providers::{
    carbon_interface, climate_trace, nasa_power, open_weather, un_sdg, world_bank,
};

/// A mock generator for one endpoint family.
type Generator = fn(&Params) -> Result<Payload>;

/// Registry of mock generators, resolved once per client.
pub struct MockCatalog {
    table: HashMap<Endpoint, Generator>,
}

impl MockCatalog {
    /// Build the catalog with every supported endpoint registered.
    #[must_use]
    pub fn new() -> Self {
        let mut table: HashMap<Endpoint, Generator> = HashMap::new();

        table.insert(Endpoint::Sectors, climate_trace::mock_sectors);
        table.insert(Endpoint::Countries, climate_trace::mock_countries);
        table.insert(Endpoint::Subsectors, climate_trace::mock_subsectors);
        table.insert(Endpoint::Continents, climate_trace::mock_continents);
        table.insert(Endpoint::Gases, climate_trace::mock_gases);
        table.insert(Endpoint::Groups, climate_trace::mock_groups);
        table.insert(Endpoint::AssetSearch, climate_trace::mock_assets);
        table.insert(Endpoint::AssetEmissions, climate_trace::mock_asset_emissions);
        table.insert(
            Endpoint::CountryEmissions,
            climate_trace::mock_country_emissions,
        );
        table.insert(Endpoint::AdminSearch, climate_trace::mock_admin_search);
        table.insert(Endpoint::AdminGeometry, climate_trace::mock_admin_geometry);
        table.insert(Endpoint::CarbonEstimate, carbon_interface::mock_estimate);
        table.insert(Endpoint::CurrentWeather, open_weather::mock_current_weather);
        table.insert(Endpoint::AirQuality, open_weather::mock_air_quality);
        table.insert(Endpoint::PowerDaily, nasa_power::mock_power_daily);
        table.insert(Endpoint::Indicator, world_bank::mock_indicator);
        table.insert(Endpoint::SdgGoals, un_sdg::mock_goals);
        table.insert(Endpoint::SdgTargets, un_sdg::mock_targets);

        Self { table }
    }

    /// Generate a substitute payload for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns the generator's error when the parameters are malformed
    /// (e.g. an inverted date range). A missing table entry is not an
    /// error; it yields the generic fallback payload.
    pub fn generate(&self, endpoint: Endpoint, params: &Params) -> Result<Payload> {
        self.table.get(&endpoint).map_or_else(
            || {
                Ok(Payload::Json(json!({
                    "mock": true,
                    "endpoint": "<unrecognized>",
                })))
            },
            |generator| generator(params),
        )
    }

    /// Number of registered generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}
