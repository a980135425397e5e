//! Core result and parameter models.
//!
//! Every provider call, live or mocked, resolves to an [`ApiResponse`]
//! carrying a classified [`CallOutcome`] and, on usable outcomes, a typed
//! [`Payload`]. Nothing in this module performs I/O.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::core::provider::Provider;
use crate::providers::carbon_interface::CarbonEstimate;
use crate::providers::climate_trace::{
    AdminArea, AdminGeoFeature, AssetFeature, CountryEmission, CountryGroups, SectorEmission,
};
use crate::providers::nasa_power::PowerDailyPoint;
use crate::providers::open_weather::{AirQualityReport, CurrentWeather};
use crate::providers::un_sdg::{SdgGoal, SdgTarget};
use crate::providers::world_bank::IndicatorSeries;

// =============================================================================
// Call Outcome
// =============================================================================

/// Classified result category of one provider call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    /// Live call returned HTTP 200/201.
    Success,
    /// Transport error or non-2xx, non-429 HTTP status.
    Failure,
    /// The transport timed out.
    Timeout,
    /// HTTP 429.
    RateLimited,
    /// Synthetic data was substituted for a live result.
    MockData,
}

impl CallOutcome {
    /// Wire/status string, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::MockData => "mock_data",
        }
    }

    /// Whether this outcome carries a payload.
    #[must_use]
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Success | Self::MockData)
    }
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a payload came from the live API or the mock catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataOrigin {
    #[serde(rename = "live_api")]
    Live,
    #[serde(rename = "mock_data")]
    Mock,
}

// =============================================================================
// Payload
// =============================================================================

/// Typed payload, one variant per endpoint family.
///
/// Live bodies that parse as JSON but do not match the expected shape are
/// kept as [`Payload::Json`]; non-JSON bodies as [`Payload::Text`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Sectors(BTreeMap<String, u32>),
    Countries(Vec<String>),
    Subsectors(Vec<String>),
    Continents(Vec<String>),
    Gases(Vec<String>),
    Groups(CountryGroups),
    Assets(Vec<AssetFeature>),
    AssetEmissions(Vec<SectorEmission>),
    CountryEmissions(Vec<CountryEmission>),
    Admins(Vec<AdminArea>),
    AdminGeometry(AdminGeoFeature),
    CarbonEstimate(CarbonEstimate),
    Weather(Box<CurrentWeather>),
    AirQuality(AirQualityReport),
    PowerDaily(PowerDailyPoint),
    Indicator(IndicatorSeries),
    SdgGoals(Vec<SdgGoal>),
    SdgTargets(Vec<SdgTarget>),
    /// Parsed JSON that did not match the endpoint's expected shape.
    Json(Value),
    /// Opaque non-JSON response body.
    Text(String),
}

impl Payload {
    /// Number of records for list-shaped payloads, if meaningful.
    #[must_use]
    pub fn record_count(&self) -> Option<usize> {
        match self {
            Self::Countries(v) | Self::Subsectors(v) | Self::Continents(v) | Self::Gases(v) => {
                Some(v.len())
            }
            Self::Assets(v) => Some(v.len()),
            Self::AssetEmissions(v) => Some(v.len()),
            Self::CountryEmissions(v) => Some(v.len()),
            Self::Admins(v) => Some(v.len()),
            Self::SdgGoals(v) => Some(v.len()),
            Self::SdgTargets(v) => Some(v.len()),
            Self::Indicator(series) => Some(series.1.len()),
            _ => None,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Ordered request parameters, used both as the live query string (or POST
/// body) and as the input handed to mock generators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn str_of(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn i64_of(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
        })
    }

    #[must_use]
    pub fn f64_of(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(|v| {
            v.as_f64()
                .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
        })
    }

    /// Split a comma-separated string parameter into its items.
    #[must_use]
    pub fn csv_of(&self, key: &str) -> Option<Vec<String>> {
        let raw = self.str_of(key)?;
        if raw.is_empty() {
            return None;
        }
        Some(raw.split(',').map(|s| s.trim().to_string()).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as query pairs for a GET request.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect()
    }

    /// Render as a JSON object for a POST body.
    #[must_use]
    pub fn to_json_body(&self) -> Value {
        Value::Object(self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

// =============================================================================
// Api Response
// =============================================================================

/// Diagnostic context attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub url: String,
    pub provider: Provider,
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// The single return shape for every provider call.
///
/// Invariant: `payload` is present iff `outcome` is usable, and `origin`
/// is [`DataOrigin::Mock`] exactly when `outcome` is
/// [`CallOutcome::MockData`]. The constructors below are the only way
/// responses are built, which keeps the invariant by construction.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub outcome: CallOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    pub origin: DataOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<CallContext>,
}

impl ApiResponse {
    /// A successful live response.
    #[must_use]
    pub fn success(payload: Payload, elapsed: Duration, context: Option<CallContext>) -> Self {
        Self {
            outcome: CallOutcome::Success,
            payload: Some(payload),
            elapsed,
            error_detail: None,
            origin: DataOrigin::Live,
            context,
        }
    }

    /// A mock-substituted response. `error_detail` names the reason the
    /// substitution happened, if any.
    #[must_use]
    pub fn mock(
        payload: Payload,
        elapsed: Duration,
        error_detail: Option<String>,
        context: Option<CallContext>,
    ) -> Self {
        Self {
            outcome: CallOutcome::MockData,
            payload: Some(payload),
            elapsed,
            error_detail,
            origin: DataOrigin::Mock,
            context,
        }
    }

    /// A failing response: no payload, live origin.
    ///
    /// `outcome` must be one of the failing variants; usable outcomes are
    /// produced by [`Self::success`] and [`Self::mock`] only.
    #[must_use]
    pub fn failed(
        outcome: CallOutcome,
        elapsed: Duration,
        error_detail: impl Into<String>,
        context: Option<CallContext>,
    ) -> Self {
        debug_assert!(!outcome.is_usable());
        Self {
            outcome,
            payload: None,
            elapsed,
            error_detail: Some(error_detail.into()),
            origin: DataOrigin::Live,
            context,
        }
    }

    /// Whether the caller received data it can work with.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.outcome.is_usable()
    }
}
