//! Carbon Interface payload types and mock generator.
//!
//! One endpoint family: `POST /estimates` with an activity type of
//! electricity, vehicle, flight, or shipping. The mock generator applies
//! fixed emission factors so estimates are reproducible in tests.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::models::{Params, Payload};
use crate::error::Result;

/// Fixed electricity emission factors in kg CO2 per kWh, keyed by
/// lowercase ISO2 country code.
pub const ELECTRICITY_FACTORS: &[(&str, f64)] = &[
    ("us", 0.4),
    ("de", 0.3),
    ("fr", 0.05),
    ("cn", 0.6),
    ("in", 0.7),
];

/// Fallback electricity factor for countries not in the table.
pub const DEFAULT_ELECTRICITY_FACTOR: f64 = 0.4;

/// Vehicle emission factor in kg CO2 per km.
pub const VEHICLE_FACTOR_PER_KM: f64 = 0.2;

/// Flight emissions in kg CO2 per passenger per leg.
pub const FLIGHT_KG_PER_LEG: f64 = 500.0;

/// Shipping emission factors in kg CO2 per (weight unit x distance unit).
pub const SHIPPING_FACTORS: &[(&str, f64)] = &[
    ("truck", 0.1),
    ("ship", 0.02),
    ("plane", 0.5),
    ("train", 0.05),
];

const MILES_TO_KM: f64 = 1.60934;

// =============================================================================
// Request Types
// =============================================================================

/// One leg of a flight estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    pub departure_airport: String,
    pub destination_airport: String,
}

/// A footprint estimate request, one variant per supported activity type.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateRequest {
    Electricity {
        value: f64,
        unit: String,
        country: String,
    },
    Vehicle {
        distance_value: f64,
        distance_unit: String,
        vehicle_model_id: Option<String>,
    },
    Flight {
        passengers: u32,
        legs: Vec<FlightLeg>,
    },
    Shipping {
        weight_value: f64,
        weight_unit: String,
        distance_value: f64,
        distance_unit: String,
        transport_method: String,
    },
}

impl EstimateRequest {
    /// The wire `type` discriminator.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Electricity { .. } => "electricity",
            Self::Vehicle { .. } => "vehicle",
            Self::Flight { .. } => "flight",
            Self::Shipping { .. } => "shipping",
        }
    }

    /// Render as the POST body / mock generator input.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let mut params = Params::new().with("type", self.kind());
        match self {
            Self::Electricity {
                value,
                unit,
                country,
            } => {
                params.insert("electricity_value", *value);
                params.insert("electricity_unit", unit.as_str());
                params.insert("country", country.as_str());
            }
            Self::Vehicle {
                distance_value,
                distance_unit,
                vehicle_model_id,
            } => {
                params.insert("distance_value", *distance_value);
                params.insert("distance_unit", distance_unit.as_str());
                if let Some(model) = vehicle_model_id {
                    params.insert("vehicle_model_id", model.as_str());
                }
            }
            Self::Flight { passengers, legs } => {
                params.insert("passengers", *passengers);
                params.insert(
                    "legs",
                    serde_json::to_value(legs).unwrap_or(serde_json::Value::Null),
                );
            }
            Self::Shipping {
                weight_value,
                weight_unit,
                distance_value,
                distance_unit,
                transport_method,
            } => {
                params.insert("weight_value", *weight_value);
                params.insert("weight_unit", weight_unit.as_str());
                params.insert("distance_value", *distance_value);
                params.insert("distance_unit", distance_unit.as_str());
                params.insert("transport_method", transport_method.as_str());
            }
        }
        params
    }
}

// =============================================================================
// Payload Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electricity_value: Option<f64>,
    pub estimated_at: String,
    pub carbon_g: f64,
    pub carbon_lb: f64,
    pub carbon_kg: f64,
    pub carbon_mt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: EstimateAttributes,
}

/// Estimate response envelope from `POST /estimates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonEstimate {
    pub data: EstimateData,
}

// =============================================================================
// Mock Generator
// =============================================================================

/// Estimate generator. Derives `carbon_kg` from the fixed factor tables
/// and the other mass fields from `carbon_kg`.
pub fn mock_estimate(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let estimate_type = params.str_of("type").unwrap_or("electricity");

    let carbon_kg = match estimate_type {
        "electricity" => {
            let kwh = params.f64_of("electricity_value").unwrap_or(100.0);
            let country = params.str_of("country").unwrap_or("us");
            let factor = ELECTRICITY_FACTORS
                .iter()
                .find(|(code, _)| *code == country)
                .map_or(DEFAULT_ELECTRICITY_FACTOR, |(_, f)| *f);
            kwh * factor
        }
        "vehicle" => {
            let mut distance = params.f64_of("distance_value").unwrap_or(100.0);
            if params.str_of("distance_unit") == Some("mi") {
                distance *= MILES_TO_KM;
            }
            distance * VEHICLE_FACTOR_PER_KM
        }
        "flight" => {
            let passengers = params.f64_of("passengers").unwrap_or(1.0);
            let legs = params
                .get("legs")
                .and_then(serde_json::Value::as_array)
                .map_or(0, Vec::len);
            legs as f64 * passengers * FLIGHT_KG_PER_LEG
        }
        "shipping" => {
            let weight = params.f64_of("weight_value").unwrap_or(10.0);
            let distance = params.f64_of("distance_value").unwrap_or(100.0);
            let method = params.str_of("transport_method").unwrap_or("truck");
            let factor = SHIPPING_FACTORS
                .iter()
                .find(|(name, _)| *name == method)
                .map_or(0.1, |(_, f)| *f);
            weight * distance * factor
        }
        _ => rng.gen_range(10.0..1_000.0),
    };

    let estimate = CarbonEstimate {
        data: EstimateData {
            id: format!("{:08x}-{:04x}", rng.r#gen::<u32>(), rng.r#gen::<u16>()),
            kind: "estimate".to_string(),
            attributes: EstimateAttributes {
                country: params.str_of("country").map(str::to_string),
                state: None,
                electricity_unit: params.str_of("electricity_unit").map(str::to_string),
                electricity_value: params.f64_of("electricity_value"),
                estimated_at: Utc::now().to_rfc3339(),
                carbon_g: carbon_kg * 1_000.0,
                carbon_lb: carbon_kg * 2.20462,
                carbon_kg,
                carbon_mt: carbon_kg / 1_000.0,
            },
        },
    };

    Ok(Payload::CarbonEstimate(estimate))
}
