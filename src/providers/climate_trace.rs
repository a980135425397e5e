//! ClimateTRACE payload types and mock generators.
//!
//! Covers the definition catalogs (sectors, countries, subsectors,
//! continents, gases, groups), asset search, emissions aggregation, and
//! administrative-boundary search/geometry endpoint families.
//!
//! Field names and casing follow the ClimateTRACE v6 responses, which mix
//! `PascalCase` (emissions aggregates) and `snake_case` (assets).

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::models::{Params, Payload};
use crate::error::{ClimiqError, Result};

// =============================================================================
// Rosters
// =============================================================================

/// Country roster used by the mock generators: (ISO3 code, display name).
pub const COUNTRIES: &[(&str, &str)] = &[
    ("USA", "United States"),
    ("CHN", "China"),
    ("IND", "India"),
    ("RUS", "Russia"),
    ("JPN", "Japan"),
    ("DEU", "Germany"),
    ("GBR", "United Kingdom"),
    ("FRA", "France"),
    ("BRA", "Brazil"),
    ("CAN", "Canada"),
];

/// Sector slug to numeric id.
pub const SECTORS: &[(&str, u32)] = &[
    ("power", 1),
    ("transportation", 2),
    ("buildings", 3),
    ("fossil-fuel-operations", 4),
    ("manufacturing", 5),
    ("mineral-extraction", 6),
    ("agriculture", 7),
    ("waste", 8),
    ("fluorinated-gases", 9),
    ("forestry-and-land-use", 10),
];

pub const SUBSECTORS: &[&str] = &[
    "electricity-generation",
    "steel",
    "cement",
    "aluminum",
    "pulp-and-paper",
    "chemicals",
    "domestic-shipping-ship",
    "international-shipping-ship",
    "domestic-shipping-port",
    "international-shipping-port",
    "domestic-aviation",
    "international-aviation",
    "road-transportation-urban-area",
    "road-transportation-road-segment",
    "oil-and-gas-production-and-transport-field",
    "oil-and-gas-production-and-transport",
    "oil-and-gas-refining",
    "petrochemicals",
    "coal-mining",
    "bauxite-mining",
    "iron-mining",
    "copper-mining",
    "forest-land-clearing",
    "forest-land-degradation",
    "forest-land-fires",
    "shrubgrass-fires",
    "wetland-fires",
    "removals",
    "net-forest-land",
    "net-wetland",
    "net-shrubgrass",
    "cropland-fires",
    "rice-cultivation",
    "enteric-fermentation",
    "manure-management",
    "synthetic-fertilizer-application",
    "solid-waste-disposal",
];

pub const GASES: &[&str] = &["n2o", "co2e", "co2", "ch4", "co2e_20yr", "co2e_100yr"];

pub const CONTINENTS: &[&str] = &[
    "Asia",
    "South America",
    "North America",
    "Oceania",
    "Antarctica",
    "Africa",
    "Europe",
];

const ADMIN_NAMES: &[&str] = &[
    "California",
    "Texas",
    "New York",
    "Florida",
    "Illinois",
    "Ontario",
    "Quebec",
    "British Columbia",
    "Alberta",
    "Manitoba",
];

/// Display name for a roster country, falling back to the code itself.
#[must_use]
pub fn country_name(code: &str) -> String {
    COUNTRIES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or_else(|| code.to_string(), |(_, name)| (*name).to_string())
}

// =============================================================================
// Payload Types
// =============================================================================

/// Country group memberships from `/definitions/groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryGroups {
    #[serde(rename = "G20")]
    pub g20: Vec<String>,
    #[serde(rename = "EU")]
    pub eu: Vec<String>,
    #[serde(rename = "OECD")]
    pub oecd: Vec<String>,
}

/// GeoJSON point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProperties {
    pub asset_id: u64,
    pub asset_name: String,
    pub country: String,
    pub sector: String,
    pub subsector: String,
    pub capacity: f64,
    pub capacity_units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEmissionRow {
    pub gas: String,
    pub quantity: f64,
    pub factor: f64,
    pub capacity: f64,
    pub activity: f64,
    #[serde(rename = "activityUnits")]
    pub activity_units: String,
    #[serde(rename = "emissionsFactor")]
    pub emissions_factor: String,
    pub remainder: f64,
}

/// One emitting asset from `/assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub id: u64,
    pub geometry: PointGeometry,
    pub properties: AssetProperties,
    pub emissions: Vec<AssetEmissionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRef {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Per-country, per-sector aggregate from `/assets/emissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorEmission {
    #[serde(rename = "AssetCount")]
    pub asset_count: u32,
    #[serde(rename = "Emissions")]
    pub emissions: f64,
    #[serde(rename = "Gas")]
    pub gas: String,
    #[serde(rename = "Country")]
    pub country: CountryRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasValue {
    pub gas: String,
    pub value: f64,
}

/// One country-year row from `/country/emissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryEmission {
    #[serde(rename = "Country")]
    pub country: CountryRef,
    #[serde(rename = "Continent")]
    pub continent: String,
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "PreviousRank")]
    pub previous_rank: u32,
    #[serde(rename = "Emissions")]
    pub emissions: Vec<GasValue>,
    #[serde(rename = "WorldEmissions")]
    pub world_emissions: Vec<GasValue>,
    #[serde(rename = "Year")]
    pub year: i64,
}

/// Administrative area hit from `/admins/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminArea {
    pub id: String,
    pub description: String,
    pub link: String,
    pub name: String,
    pub level: u8,
    pub country: String,
    pub area_km2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminGeoProperties {
    pub admin_id: String,
    pub name: String,
    pub level: u8,
    pub area_km2: f64,
    pub population: u64,
}

/// GeoJSON boundary feature from `/admins/{id}/geojson`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminGeoFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub id: String,
    pub geometry: PolygonGeometry,
    pub properties: AdminGeoProperties,
}

// =============================================================================
// Mock Generators
// =============================================================================

pub fn mock_sectors(_params: &Params) -> Result<Payload> {
    let sectors: BTreeMap<String, u32> = SECTORS
        .iter()
        .map(|(name, id)| ((*name).to_string(), *id))
        .collect();
    Ok(Payload::Sectors(sectors))
}

pub fn mock_countries(_params: &Params) -> Result<Payload> {
    Ok(Payload::Countries(
        COUNTRIES.iter().map(|(code, _)| (*code).to_string()).collect(),
    ))
}

pub fn mock_subsectors(_params: &Params) -> Result<Payload> {
    Ok(Payload::Subsectors(
        SUBSECTORS.iter().map(|s| (*s).to_string()).collect(),
    ))
}

pub fn mock_continents(_params: &Params) -> Result<Payload> {
    Ok(Payload::Continents(
        CONTINENTS.iter().map(|s| (*s).to_string()).collect(),
    ))
}

pub fn mock_gases(_params: &Params) -> Result<Payload> {
    Ok(Payload::Gases(GASES.iter().map(|s| (*s).to_string()).collect()))
}

pub fn mock_groups(_params: &Params) -> Result<Payload> {
    Ok(Payload::Groups(CountryGroups {
        g20: to_strings(&["USA", "CHN", "IND", "RUS", "JPN", "DEU", "GBR", "FRA", "BRA", "CAN"]),
        eu: to_strings(&["DEU", "FRA", "ITA", "ESP", "POL", "ROU", "NLD", "BEL", "GRC", "PRT"]),
        oecd: to_strings(&["USA", "JPN", "DEU", "GBR", "FRA", "CAN", "AUS", "KOR", "ESP", "MEX"]),
    }))
}

/// Asset search: honors the `limit` cap (at most 50 synthetic assets) and
/// echoes requested country/sector back into every record.
pub fn mock_assets(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let country = params.str_of("countries").map(str::to_string);
    let sector = params.str_of("sectors").map(str::to_string);
    let limit = params.i64_of("limit").unwrap_or(100).max(0) as usize;
    let count = limit.min(50);

    let mut assets = Vec::with_capacity(count);
    for i in 0..count {
        let asset_id = rng.gen_range(1_000_000..10_000_000_u64);
        let (lat, lon) = coordinates_for(country.as_deref(), &mut rng);
        let asset_country = country
            .clone()
            .unwrap_or_else(|| COUNTRIES[i % COUNTRIES.len()].0.to_string());
        let asset_sector = sector
            .clone()
            .unwrap_or_else(|| SECTORS[i % SECTORS.len()].0.to_string());
        let is_power = asset_sector == "power";

        let emissions = GASES
            .iter()
            .map(|gas| AssetEmissionRow {
                gas: (*gas).to_string(),
                quantity: rng.gen_range(1_000.0..100_000.0),
                factor: rng.gen_range(0.1..2.0),
                capacity: rng.gen_range(10.0..1_000.0),
                activity: rng.gen_range(100.0..10_000.0),
                activity_units: if is_power { "MWh" } else { "units" }.to_string(),
                emissions_factor: "modeled".to_string(),
                remainder: rng.gen_range(0.0..100.0),
            })
            .collect();

        assets.push(AssetFeature {
            feature_type: "Feature".to_string(),
            id: asset_id,
            geometry: PointGeometry {
                geometry_type: "Point".to_string(),
                coordinates: [lon, lat],
            },
            properties: AssetProperties {
                asset_id,
                asset_name: format!("Asset {asset_id}"),
                country: asset_country,
                sector: asset_sector,
                subsector: SUBSECTORS[i % SUBSECTORS.len()].to_string(),
                capacity: rng.gen_range(10.0..1_000.0),
                capacity_units: if is_power { "MW" } else { "units" }.to_string(),
            },
            emissions,
        });
    }

    Ok(Payload::Assets(assets))
}

/// Emissions aggregation: one record per requested country x sector pair,
/// tagged with the requested gas.
pub fn mock_asset_emissions(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let countries = params
        .csv_of("countries")
        .unwrap_or_else(|| COUNTRIES[..5].iter().map(|(c, _)| (*c).to_string()).collect());
    let sectors = params
        .csv_of("sectors")
        .unwrap_or_else(|| SECTORS[..3].iter().map(|(s, _)| (*s).to_string()).collect());
    let gas = params.str_of("gas").unwrap_or("co2e_100yr").to_string();

    let mut rows = Vec::with_capacity(countries.len() * sectors.len());
    for country in &countries {
        for _sector in &sectors {
            rows.push(SectorEmission {
                asset_count: rng.gen_range(10..500),
                emissions: rng.gen_range(1_000_000.0..50_000_000.0),
                gas: gas.clone(),
                country: CountryRef {
                    code: country.clone(),
                    name: country_name(country),
                },
            });
        }
    }

    Ok(Payload::AssetEmissions(rows))
}

/// Country emissions: one record per requested country x year, each tagged
/// with its country code and year. A country's emissions never exceed the
/// world total for the same gas.
pub fn mock_country_emissions(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let countries = params
        .csv_of("countries")
        .unwrap_or_else(|| COUNTRIES[..5].iter().map(|(c, _)| (*c).to_string()).collect());
    let since = params.i64_of("since").unwrap_or(2022);
    let to = params.i64_of("to").unwrap_or(2022);
    if since > to {
        return Err(ClimiqError::MockData {
            endpoint: "country_emissions".to_string(),
            reason: format!("invalid year range: since={since} > to={to}"),
        });
    }

    let mut rows = Vec::new();
    for country in &countries {
        for year in since..=to {
            let emissions: Vec<GasValue> = GASES
                .iter()
                .map(|gas| GasValue {
                    gas: (*gas).to_string(),
                    value: rng.gen_range(100_000.0..10_000_000.0),
                })
                .collect();
            // world totals scale up from the country values so the
            // country <= world relationship always holds per gas
            let world_emissions = emissions
                .iter()
                .map(|gv| GasValue {
                    gas: gv.gas.clone(),
                    value: gv.value * rng.gen_range(10.0..100.0),
                })
                .collect();

            rows.push(CountryEmission {
                country: CountryRef {
                    code: country.clone(),
                    name: country_name(country),
                },
                continent: CONTINENTS[rng.gen_range(0..CONTINENTS.len())].to_string(),
                rank: rng.gen_range(1..=200),
                previous_rank: rng.gen_range(1..=200),
                emissions,
                world_emissions,
                year,
            });
        }
    }

    Ok(Payload::CountryEmissions(rows))
}

/// Admin search: fixed roster filtered by the optional `name` substring.
pub fn mock_admin_search(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let name_filter = params.str_of("name").map(str::to_lowercase);
    let level = params.i64_of("level");

    let admins = ADMIN_NAMES
        .iter()
        .enumerate()
        .filter(|(_, admin_name)| {
            name_filter
                .as_ref()
                .is_none_or(|f| admin_name.to_lowercase().contains(f))
        })
        .map(|(i, admin_name)| AdminArea {
            id: format!("ADMIN_{}", i + 1),
            description: format!("{admin_name} Administrative Area"),
            link: format!("/admins/ADMIN_{}/geojson", i + 1),
            name: (*admin_name).to_string(),
            level: level.map_or((i % 3) as u8, |l| l as u8),
            country: COUNTRIES[i % COUNTRIES.len()].0.to_string(),
            area_km2: rng.gen_range(1_000.0..500_000.0),
        })
        .collect();

    Ok(Payload::Admins(admins))
}

/// Admin geometry: a square polygon around a synthetic center point.
pub fn mock_admin_geometry(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let admin_id = params.str_of("admin_id").unwrap_or("ADMIN_1").to_string();
    let center_lat = rng.gen_range(25.0..49.0);
    let center_lon = rng.gen_range(-125.0..-66.0);
    let offset = 0.5;

    let ring = vec![
        [center_lon - offset, center_lat - offset],
        [center_lon + offset, center_lat - offset],
        [center_lon + offset, center_lat + offset],
        [center_lon - offset, center_lat + offset],
        [center_lon - offset, center_lat - offset],
    ];

    Ok(Payload::AdminGeometry(AdminGeoFeature {
        feature_type: "Feature".to_string(),
        id: admin_id.clone(),
        geometry: PolygonGeometry {
            geometry_type: "Polygon".to_string(),
            coordinates: vec![ring],
        },
        properties: AdminGeoProperties {
            admin_id: admin_id.clone(),
            name: format!("Admin {admin_id}"),
            level: rng.gen_range(0..=2),
            area_km2: rng.gen_range(1_000.0..100_000.0),
            population: rng.gen_range(100_000..10_000_000),
        },
    }))
}

fn coordinates_for(country: Option<&str>, rng: &mut impl Rng) -> (f64, f64) {
    match country {
        Some("USA") => (rng.gen_range(25.0..49.0), rng.gen_range(-125.0..-66.0)),
        Some("CHN") => (rng.gen_range(18.0..54.0), rng.gen_range(73.0..135.0)),
        _ => (rng.gen_range(-60.0..75.0), rng.gen_range(-180.0..180.0)),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
