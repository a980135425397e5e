//! NASA POWER payload types and mock generator.
//!
//! One endpoint family: daily point values (`/daily/point`) for renewable
//! energy parameters such as solar irradiance, wind speed, and surface
//! temperature. The response is a GeoJSON feature whose `properties`
//! carry one date-keyed series per requested parameter.

use std::collections::BTreeMap;

use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::models::{Params, Payload};
use crate::error::{ClimiqError, Result};

/// Date format used by the POWER API (`YYYYMMDD`).
const DATE_FORMAT: &str = "%Y%m%d";

// =============================================================================
// Payload Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerProperties {
    /// Parameter name -> (date `YYYYMMDD` -> value).
    pub parameter: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerHeader {
    pub title: String,
    pub api_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Daily point response from `/daily/point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerDailyPoint {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: PowerGeometry,
    pub properties: PowerProperties,
    pub header: PowerHeader,
}

// =============================================================================
// Mock Generator
// =============================================================================

/// Daily point generator. Honors the requested date range (one value per
/// day per parameter) and draws values from each parameter's plausible
/// physical range.
pub fn mock_power_daily(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let parameters: Vec<String> = params
        .csv_of("parameters")
        .unwrap_or_else(|| vec!["ALLSKY_SFC_SW_DWN".to_string()]);
    let lat = params.f64_of("latitude").unwrap_or(40.7);
    let lon = params.f64_of("longitude").unwrap_or(-74.0);
    let start_raw = params.str_of("start").unwrap_or("20240101");
    let end_raw = params.str_of("end").unwrap_or("20240103");

    let start = parse_date(start_raw)?;
    let end = parse_date(end_raw)?;
    if start > end {
        return Err(ClimiqError::MockData {
            endpoint: "power_daily".to_string(),
            reason: format!("invalid date range: {start_raw} > {end_raw}"),
        });
    }

    let mut parameter: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut day = start;
    while day <= end {
        let date_key = day.format(DATE_FORMAT).to_string();
        for param in &parameters {
            let value = match param.as_str() {
                // kWh/m^2/day
                "ALLSKY_SFC_SW_DWN" => rng.gen_range(2.0..8.0),
                // m/s
                "WS10M" => rng.gen_range(1.0..15.0),
                // degrees C
                "T2M" => rng.gen_range(-20.0..40.0),
                _ => rng.gen_range(0.0..100.0),
            };
            parameter
                .entry(param.clone())
                .or_default()
                .insert(date_key.clone(), value);
        }
        day = day + ChronoDuration::days(1);
    }

    Ok(Payload::PowerDaily(PowerDailyPoint {
        feature_type: "Feature".to_string(),
        geometry: PowerGeometry {
            geometry_type: "Point".to_string(),
            coordinates: [lon, lat, 0.0],
        },
        properties: PowerProperties { parameter },
        header: PowerHeader {
            title: "NASA/POWER CERES/MERRA2 Native Resolution Daily Data".to_string(),
            api_version: "v2.5.0".to_string(),
            start_date: Some(start_raw.to_string()),
            end_date: Some(end_raw.to_string()),
        },
    }))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| ClimiqError::MockData {
        endpoint: "power_daily".to_string(),
        reason: format!("invalid date '{raw}': {e}"),
    })
}
