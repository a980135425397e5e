//! Unified climate API client.
//!
//! [`ClimateClient`] owns the HTTP session, the mock catalog, and the
//! call statistics. Every public method performs at most one outbound
//! request, classifies the result, and applies the configured fallback
//! policy; the caller always receives a well-formed [`ApiResponse`],
//! never an error, for provider calls.
//!
//! Calls are issued strictly sequentially. The statistics mutex exists
//! only so methods can take `&self`; nothing in this crate dispatches in
//! parallel.

use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::health::{HealthReport, ProbeReport};
use crate::core::http::{self, Body, HttpMethod, WireOutcome};
use crate::core::models::{ApiResponse, CallContext, CallOutcome, Params, Payload};
use crate::core::provider::{Endpoint, Provider};
use crate::core::stats::{RunningStats, StatsSnapshot};
use crate::error::{ClimiqError, Result};
use crate::mock::MockCatalog;
use crate::providers::carbon_interface::EstimateRequest;

// =============================================================================
// Fetch Mode
// =============================================================================

/// Fallback policy mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Always call the live API; never substitute mock data.
    Live,
    /// Never call the live API; always serve mock data.
    Mock,
    /// Call the live API and substitute mock data on any failure.
    #[default]
    Hybrid,
}

impl FetchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Mock => "mock",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for FetchMode {
    type Err = ClimiqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "mock" => Ok(Self::Mock),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(ClimiqError::InvalidMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for FetchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Request Parts
// =============================================================================

/// Everything needed to issue (or mock) one endpoint call.
struct RequestParts {
    endpoint: Endpoint,
    method: HttpMethod,
    url: String,
    params: Params,
    headers: Vec<(String, String)>,
}

impl RequestParts {
    fn get(endpoint: Endpoint, url: String, params: Params) -> Self {
        Self {
            endpoint,
            method: HttpMethod::Get,
            url,
            params,
            headers: Vec::new(),
        }
    }
}

// =============================================================================
// Climate Client
// =============================================================================

/// Unified client over all six providers.
pub struct ClimateClient {
    http: reqwest::Client,
    config: Config,
    mode: FetchMode,
    catalog: MockCatalog,
    stats: Mutex<RunningStats>,
}

impl ClimateClient {
    /// Build a client from configuration, using the configured mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let mode = config.general.mode;
        Self::with_mode(config, mode)
    }

    /// Build a client with an explicit fallback mode.
    pub fn with_mode(config: Config, mode: FetchMode) -> Result<Self> {
        config.validate()?;
        let http = http::build_client(config.timeout())?;
        Ok(Self {
            http,
            config,
            mode,
            catalog: MockCatalog::new(),
            stats: Mutex::new(RunningStats::new()),
        })
    }

    /// The active fallback mode.
    #[must_use]
    pub const fn mode(&self) -> FetchMode {
        self.mode
    }

    /// Snapshot of the call statistics.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats_guard().snapshot()
    }

    /// Zero the call statistics.
    pub fn reset_stats(&self) {
        self.stats_guard().reset();
    }

    fn stats_guard(&self) -> std::sync::MutexGuard<'_, RunningStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Effective timeout for one request: the configured timeout caps the
    /// per-provider default.
    fn timeout_for(&self, provider: Provider) -> Duration {
        provider.default_timeout().min(self.config.timeout())
    }

    async fn dispatch(&self, parts: RequestParts, mode: FetchMode) -> ApiResponse {
        let provider = parts.endpoint.provider();
        self.stats_guard().record_attempt();

        // Credential-gated providers are served from the catalog when no
        // key is configured, in every mode.
        if provider.requires_credential() && self.config.api_key(provider).is_none() {
            tracing::debug!(endpoint = %parts.endpoint, "no API key configured, serving mock data");
            return self.mock_response(
                &parts,
                Some("no API key configured, using mock data".to_string()),
            );
        }

        if mode == FetchMode::Mock {
            return self.mock_response(&parts, None);
        }

        let timeout = self.timeout_for(provider);
        tracing::debug!(endpoint = %parts.endpoint, url = %parts.url, method = %parts.method, "dispatching request");
        let started = Instant::now();
        let wire = http::execute(
            &self.http,
            parts.method,
            &parts.url,
            &parts.params,
            &parts.headers,
            timeout,
        )
        .await;
        let elapsed = started.elapsed();

        match wire {
            WireOutcome::Success { status, body } => {
                self.stats_guard().record(CallOutcome::Success, elapsed);
                let payload = typed_payload(parts.endpoint, body);
                ApiResponse::success(
                    payload,
                    elapsed,
                    Some(context(provider, &parts.url, Some(status))),
                )
            }
            WireOutcome::RateLimited { status } => {
                self.stats_guard().record(CallOutcome::RateLimited, elapsed);
                if mode == FetchMode::Hybrid {
                    self.mock_response(&parts, Some("rate limited, using mock data".to_string()))
                } else {
                    ApiResponse::failed(
                        CallOutcome::RateLimited,
                        elapsed,
                        format!("rate limited: {status}"),
                        Some(context(provider, &parts.url, Some(status))),
                    )
                }
            }
            WireOutcome::HttpError { status, snippet } => {
                self.stats_guard().record(CallOutcome::Failure, elapsed);
                if mode == FetchMode::Hybrid {
                    self.mock_response(
                        &parts,
                        Some(format!("HTTP {status}, using mock data")),
                    )
                } else {
                    ApiResponse::failed(
                        CallOutcome::Failure,
                        elapsed,
                        format!("HTTP {status}: {snippet}"),
                        Some(context(provider, &parts.url, Some(status))),
                    )
                }
            }
            WireOutcome::TimedOut => {
                self.stats_guard().record(CallOutcome::Timeout, elapsed);
                if mode == FetchMode::Hybrid {
                    self.mock_response(&parts, Some("request timeout, using mock data".to_string()))
                } else {
                    ApiResponse::failed(
                        CallOutcome::Timeout,
                        elapsed,
                        "request timeout",
                        Some(context(provider, &parts.url, None)),
                    )
                }
            }
            WireOutcome::Transport(message) => {
                self.stats_guard().record(CallOutcome::Failure, elapsed);
                if mode == FetchMode::Hybrid {
                    self.mock_response(
                        &parts,
                        Some(format!("connection error: {message}, using mock data")),
                    )
                } else {
                    ApiResponse::failed(
                        CallOutcome::Failure,
                        elapsed,
                        message,
                        Some(context(provider, &parts.url, None)),
                    )
                }
            }
        }
    }

    /// Serve a mock substitute. Generation failures are converted into a
    /// Failure response; this never panics or returns an error.
    fn mock_response(&self, parts: &RequestParts, reason: Option<String>) -> ApiResponse {
        let provider = parts.endpoint.provider();
        let started = Instant::now();
        match self.catalog.generate(parts.endpoint, &parts.params) {
            Ok(payload) => {
                let elapsed = started.elapsed();
                self.stats_guard().record(CallOutcome::MockData, elapsed);
                ApiResponse::mock(
                    payload,
                    elapsed,
                    reason,
                    Some(context(provider, &parts.url, None)),
                )
            }
            Err(e) => {
                let elapsed = started.elapsed();
                self.stats_guard().record(CallOutcome::Failure, elapsed);
                tracing::warn!(endpoint = %parts.endpoint, error = %e, "mock data generation failed");
                ApiResponse::failed(
                    CallOutcome::Failure,
                    elapsed,
                    format!("mock data generation failed: {e}"),
                    Some(context(provider, &parts.url, None)),
                )
            }
        }
    }

    // -------------------------------------------------------------------------
    // ClimateTRACE
    // -------------------------------------------------------------------------

    /// Available sectors.
    pub async fn climate_trace_sectors(&self) -> ApiResponse {
        self.dispatch(self.definition_request(Endpoint::Sectors, "sectors"), self.mode)
            .await
    }

    /// Available country codes.
    pub async fn climate_trace_countries(&self) -> ApiResponse {
        self.dispatch(
            self.definition_request(Endpoint::Countries, "countries"),
            self.mode,
        )
        .await
    }

    /// Available subsectors.
    pub async fn climate_trace_subsectors(&self) -> ApiResponse {
        self.dispatch(
            self.definition_request(Endpoint::Subsectors, "subsectors"),
            self.mode,
        )
        .await
    }

    /// Continent list.
    pub async fn climate_trace_continents(&self) -> ApiResponse {
        self.dispatch(
            self.definition_request(Endpoint::Continents, "continents"),
            self.mode,
        )
        .await
    }

    /// Gas identifiers.
    pub async fn climate_trace_gases(&self) -> ApiResponse {
        self.dispatch(self.definition_request(Endpoint::Gases, "gases"), self.mode)
            .await
    }

    /// Country group memberships.
    pub async fn climate_trace_groups(&self) -> ApiResponse {
        self.dispatch(self.definition_request(Endpoint::Groups, "groups"), self.mode)
            .await
    }

    /// Emissions aggregated by country and sector.
    pub async fn climate_trace_emissions(
        &self,
        countries: &[String],
        sectors: &[String],
        years: &[i64],
        gas: Option<&str>,
    ) -> ApiResponse {
        let base = self.config.base_url(Provider::ClimateTrace);
        let mut params = Params::new().with("gas", gas.unwrap_or("co2e_100yr"));
        if !countries.is_empty() {
            params.insert("countries", countries.join(","));
        }
        if !sectors.is_empty() {
            params.insert("sectors", sectors.join(","));
        }
        let years_value = if years.is_empty() {
            "2022".to_string()
        } else {
            years
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        params.insert("years", years_value);

        let parts = RequestParts::get(
            Endpoint::AssetEmissions,
            format!("{base}/assets/emissions"),
            params,
        );
        self.dispatch(parts, self.mode).await
    }

    /// Search for emitting assets.
    pub async fn search_climate_trace_assets(
        &self,
        country: Option<&str>,
        sector: Option<&str>,
        limit: i64,
        year: i64,
    ) -> ApiResponse {
        let base = self.config.base_url(Provider::ClimateTrace);
        let mut params = Params::new()
            .with("limit", limit.min(1_000))
            .with("year", year);
        if let Some(country) = country {
            params.insert("countries", country.to_uppercase());
        }
        if let Some(sector) = sector {
            params.insert("sectors", sector);
        }

        let parts = RequestParts::get(Endpoint::AssetSearch, format!("{base}/assets"), params);
        self.dispatch(parts, self.mode).await
    }

    /// Per-country emissions over an inclusive year range.
    pub async fn climate_trace_country_emissions(
        &self,
        countries: &[String],
        since: i64,
        to: i64,
    ) -> ApiResponse {
        let base = self.config.base_url(Provider::ClimateTrace);
        let mut params = Params::new().with("since", since).with("to", to);
        if !countries.is_empty() {
            params.insert("countries", countries.join(","));
        }

        let parts = RequestParts::get(
            Endpoint::CountryEmissions,
            format!("{base}/country/emissions"),
            params,
        );
        self.dispatch(parts, self.mode).await
    }

    /// Search administrative areas by name and level.
    pub async fn climate_trace_admin_search(
        &self,
        name: Option<&str>,
        level: Option<i64>,
    ) -> ApiResponse {
        let base = self.config.base_url(Provider::ClimateTrace);
        let mut params = Params::new();
        if let Some(name) = name {
            params.insert("name", name);
        }
        if let Some(level) = level {
            params.insert("level", level);
        }

        let parts = RequestParts::get(Endpoint::AdminSearch, format!("{base}/admins/search"), params);
        self.dispatch(parts, self.mode).await
    }

    /// Boundary geometry for one administrative area.
    pub async fn climate_trace_admin_geometry(&self, admin_id: &str) -> ApiResponse {
        let base = self.config.base_url(Provider::ClimateTrace);
        let params = Params::new().with("admin_id", admin_id);
        let parts = RequestParts::get(
            Endpoint::AdminGeometry,
            format!("{base}/admins/{admin_id}/geojson"),
            params,
        );
        self.dispatch(parts, self.mode).await
    }

    fn definition_request(&self, endpoint: Endpoint, path: &str) -> RequestParts {
        let base = self.config.base_url(Provider::ClimateTrace);
        RequestParts::get(endpoint, format!("{base}/definitions/{path}"), Params::new())
    }

    // -------------------------------------------------------------------------
    // Carbon Interface
    // -------------------------------------------------------------------------

    /// Calculate a carbon footprint estimate.
    pub async fn calculate_carbon_footprint(&self, request: &EstimateRequest) -> ApiResponse {
        let parts = self.estimate_request(request);
        self.dispatch(parts, self.mode).await
    }

    fn estimate_request(&self, request: &EstimateRequest) -> RequestParts {
        let base = self.config.base_url(Provider::CarbonInterface);
        let mut headers = Vec::new();
        if let Some(token) = self.config.api_key(Provider::CarbonInterface) {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        RequestParts {
            endpoint: Endpoint::CarbonEstimate,
            method: HttpMethod::Post,
            url: format!("{base}/estimates"),
            params: request.to_params(),
            headers,
        }
    }

    // -------------------------------------------------------------------------
    // OpenWeatherMap
    // -------------------------------------------------------------------------

    /// Current weather for a `City,CC` location string.
    pub async fn get_weather_data(&self, location: &str) -> ApiResponse {
        let parts = self.weather_request(location);
        self.dispatch(parts, self.mode).await
    }

    fn weather_request(&self, location: &str) -> RequestParts {
        let base = self.config.base_url(Provider::OpenWeather);
        let mut params = Params::new().with("q", location).with("units", "metric");
        if let Some(key) = self.config.api_key(Provider::OpenWeather) {
            params.insert("appid", key);
        }
        RequestParts::get(Endpoint::CurrentWeather, format!("{base}/weather"), params)
    }

    /// Air quality at coordinates.
    pub async fn get_air_quality(&self, lat: f64, lon: f64) -> ApiResponse {
        let base = self.config.base_url(Provider::OpenWeather);
        let mut params = Params::new().with("lat", lat).with("lon", lon);
        if let Some(key) = self.config.api_key(Provider::OpenWeather) {
            params.insert("appid", key);
        }
        let parts = RequestParts::get(Endpoint::AirQuality, format!("{base}/air_pollution"), params);
        self.dispatch(parts, self.mode).await
    }

    // -------------------------------------------------------------------------
    // NASA POWER
    // -------------------------------------------------------------------------

    /// Daily renewable-energy point values for a coordinate and date range
    /// (`YYYYMMDD` bounds, inclusive).
    pub async fn get_nasa_power_data(
        &self,
        lat: f64,
        lon: f64,
        parameters: &[String],
        start_date: &str,
        end_date: &str,
    ) -> ApiResponse {
        let parts = self.power_request(lat, lon, parameters, start_date, end_date);
        self.dispatch(parts, self.mode).await
    }

    fn power_request(
        &self,
        lat: f64,
        lon: f64,
        parameters: &[String],
        start_date: &str,
        end_date: &str,
    ) -> RequestParts {
        let base = self.config.base_url(Provider::NasaPower);
        let mut params = Params::new()
            .with("parameters", parameters.join(","))
            .with("community", "RE")
            .with("longitude", lon)
            .with("latitude", lat)
            .with("start", start_date)
            .with("end", end_date)
            .with("format", "JSON");
        if let Some(key) = self.config.api_key(Provider::NasaPower) {
            params.insert("api_key", key);
        }
        RequestParts::get(Endpoint::PowerDaily, format!("{base}/daily/point"), params)
    }

    // -------------------------------------------------------------------------
    // World Bank
    // -------------------------------------------------------------------------

    /// Indicator time series for one country.
    pub async fn get_world_bank_indicator(
        &self,
        country: &str,
        indicator: &str,
        start_year: i64,
        end_year: i64,
    ) -> ApiResponse {
        let parts = self.indicator_request(country, indicator, start_year, end_year);
        self.dispatch(parts, self.mode).await
    }

    fn indicator_request(
        &self,
        country: &str,
        indicator: &str,
        start_year: i64,
        end_year: i64,
    ) -> RequestParts {
        let base = self.config.base_url(Provider::WorldBank);
        let params = Params::new()
            .with("format", "json")
            .with("date", format!("{start_year}:{end_year}"))
            .with("per_page", 100)
            .with("country", country)
            .with("indicator", indicator);
        RequestParts::get(
            Endpoint::Indicator,
            format!("{base}/country/{country}/indicator/{indicator}"),
            params,
        )
    }

    // -------------------------------------------------------------------------
    // UN SDG
    // -------------------------------------------------------------------------

    /// The SDG goal catalog.
    pub async fn get_un_sdg_goals(&self) -> ApiResponse {
        let parts = self.goals_request();
        self.dispatch(parts, self.mode).await
    }

    fn goals_request(&self) -> RequestParts {
        let base = self.config.base_url(Provider::UnSdg);
        RequestParts::get(
            Endpoint::SdgGoals,
            format!("{base}/sdg/Goal/List"),
            Params::new(),
        )
    }

    /// Targets for one SDG goal.
    pub async fn get_un_sdg_targets(&self, goal_id: &str) -> ApiResponse {
        let base = self.config.base_url(Provider::UnSdg);
        let params = Params::new().with("goal_id", goal_id);
        let parts = RequestParts::get(
            Endpoint::SdgTargets,
            format!("{base}/sdg/Goal/{goal_id}/Target/List"),
            params,
        );
        self.dispatch(parts, self.mode).await
    }

    // -------------------------------------------------------------------------
    // Health
    // -------------------------------------------------------------------------

    /// Probe every provider once, sequentially, and aggregate availability.
    ///
    /// Probes always run under the Hybrid policy regardless of the
    /// client's configured mode, so a health check cannot fail outright:
    /// providers without credentials or connectivity report mock-backed
    /// availability instead.
    pub async fn health_check(&self) -> HealthReport {
        let mut probes = Vec::with_capacity(Provider::ALL.len());

        let response = self
            .dispatch(self.definition_request(Endpoint::Sectors, "sectors"), FetchMode::Hybrid)
            .await;
        probes.push(probe_report(Provider::ClimateTrace, &response));

        let estimate = EstimateRequest::Electricity {
            value: 1.0,
            unit: "kwh".to_string(),
            country: "us".to_string(),
        };
        let response = self
            .dispatch(self.estimate_request(&estimate), FetchMode::Hybrid)
            .await;
        probes.push(probe_report(Provider::CarbonInterface, &response));

        let response = self
            .dispatch(self.weather_request("New York,US"), FetchMode::Hybrid)
            .await;
        probes.push(probe_report(Provider::OpenWeather, &response));

        let response = self
            .dispatch(
                self.power_request(
                    40.7,
                    -74.0,
                    &["ALLSKY_SFC_SW_DWN".to_string()],
                    "20240101",
                    "20240101",
                ),
                FetchMode::Hybrid,
            )
            .await;
        probes.push(probe_report(Provider::NasaPower, &response));

        let response = self
            .dispatch(
                self.indicator_request("USA", "EN.ATM.CO2E.KT", 2022, 2022),
                FetchMode::Hybrid,
            )
            .await;
        probes.push(probe_report(Provider::WorldBank, &response));

        let response = self.dispatch(self.goals_request(), FetchMode::Hybrid).await;
        probes.push(probe_report(Provider::UnSdg, &response));

        HealthReport::from_probes(probes)
    }
}

fn probe_report(provider: Provider, response: &ApiResponse) -> ProbeReport {
    ProbeReport {
        provider,
        status: response.outcome,
        elapsed: response.elapsed,
        available: response.is_usable(),
    }
}

fn context(provider: Provider, url: &str, status_code: Option<u16>) -> CallContext {
    CallContext {
        status_code,
        url: url.to_string(),
        provider,
    }
}

/// Deserialize a live JSON body into the endpoint's typed payload,
/// keeping the raw value when the shape does not match.
fn typed_payload(endpoint: Endpoint, body: Body) -> Payload {
    let value = match body {
        Body::Text(text) => return Payload::Text(text),
        Body::Json(value) => value,
    };

    macro_rules! parse {
        ($variant:path, $ty:ty) => {
            serde_json::from_value::<$ty>(value.clone())
                .map_or_else(|_| Payload::Json(value), |typed| $variant(typed))
        };
    }

    match endpoint {
        Endpoint::Sectors => parse!(Payload::Sectors, std::collections::BTreeMap<String, u32>),
        Endpoint::Countries => parse!(Payload::Countries, Vec<String>),
        Endpoint::Subsectors => parse!(Payload::Subsectors, Vec<String>),
        Endpoint::Continents => parse!(Payload::Continents, Vec<String>),
        Endpoint::Gases => parse!(Payload::Gases, Vec<String>),
        Endpoint::Groups => parse!(Payload::Groups, crate::providers::climate_trace::CountryGroups),
        Endpoint::AssetSearch => {
            parse!(Payload::Assets, Vec<crate::providers::climate_trace::AssetFeature>)
        }
        Endpoint::AssetEmissions => {
            parse!(
                Payload::AssetEmissions,
                Vec<crate::providers::climate_trace::SectorEmission>
            )
        }
        Endpoint::CountryEmissions => {
            parse!(
                Payload::CountryEmissions,
                Vec<crate::providers::climate_trace::CountryEmission>
            )
        }
        Endpoint::AdminSearch => {
            parse!(Payload::Admins, Vec<crate::providers::climate_trace::AdminArea>)
        }
        Endpoint::AdminGeometry => {
            parse!(
                Payload::AdminGeometry,
                crate::providers::climate_trace::AdminGeoFeature
            )
        }
        Endpoint::CarbonEstimate => {
            parse!(
                Payload::CarbonEstimate,
                crate::providers::carbon_interface::CarbonEstimate
            )
        }
        Endpoint::CurrentWeather => serde_json::from_value::<
            crate::providers::open_weather::CurrentWeather,
        >(value.clone())
        .map_or_else(|_| Payload::Json(value), |w| Payload::Weather(Box::new(w))),
        Endpoint::AirQuality => {
            parse!(Payload::AirQuality, crate::providers::open_weather::AirQualityReport)
        }
        Endpoint::PowerDaily => {
            parse!(Payload::PowerDaily, crate::providers::nasa_power::PowerDailyPoint)
        }
        Endpoint::Indicator => {
            parse!(Payload::Indicator, crate::providers::world_bank::IndicatorSeries)
        }
        Endpoint::SdgGoals => parse!(Payload::SdgGoals, Vec<crate::providers::un_sdg::SdgGoal>),
        Endpoint::SdgTargets => {
            parse!(Payload::SdgTargets, Vec<crate::providers::un_sdg::SdgTarget>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fetch_mode_parses_case_insensitively() {
        assert_eq!("LIVE".parse::<FetchMode>().unwrap(), FetchMode::Live);
        assert_eq!("mock".parse::<FetchMode>().unwrap(), FetchMode::Mock);
        assert_eq!("Hybrid".parse::<FetchMode>().unwrap(), FetchMode::Hybrid);
        assert!("sometimes".parse::<FetchMode>().is_err());
    }

    #[test]
    fn fetch_mode_default_is_hybrid() {
        assert_eq!(FetchMode::default(), FetchMode::Hybrid);
    }

    #[test]
    fn typed_payload_parses_matching_shape() {
        let body = Body::Json(json!(["USA", "CHN", "IND"]));
        let payload = typed_payload(Endpoint::Countries, body);
        assert_eq!(
            payload,
            Payload::Countries(vec![
                "USA".to_string(),
                "CHN".to_string(),
                "IND".to_string()
            ])
        );
    }

    #[test]
    fn typed_payload_keeps_raw_json_on_mismatch() {
        let body = Body::Json(json!({"unexpected": "shape"}));
        let payload = typed_payload(Endpoint::Countries, body);
        let Payload::Json(value) = payload else {
            panic!("expected raw json payload");
        };
        assert_eq!(value["unexpected"], "shape");
    }

    #[test]
    fn typed_payload_keeps_opaque_text() {
        let payload = typed_payload(Endpoint::Sectors, Body::Text("<html>".to_string()));
        assert_eq!(payload, Payload::Text("<html>".to_string()));
    }

    #[tokio::test]
    async fn mock_mode_serves_catalog_without_network() {
        let client = ClimateClient::with_mode(Config::default(), FetchMode::Mock).unwrap();
        let response = client.climate_trace_sectors().await;

        assert_eq!(response.outcome, CallOutcome::MockData);
        assert!(response.payload.is_some());
        assert!(response.error_detail.is_none());

        let snap = client.stats();
        assert_eq!(snap.total_calls, 1);
        assert_eq!(snap.mock_calls, 1);
        assert_eq!(snap.successful_calls, 0);
    }

    #[tokio::test]
    async fn missing_credential_forces_mock_even_in_live_mode() {
        let client = ClimateClient::with_mode(Config::default(), FetchMode::Live).unwrap();
        let response = client.get_weather_data("Paris,FR").await;

        assert_eq!(response.outcome, CallOutcome::MockData);
        assert!(
            response
                .error_detail
                .as_deref()
                .unwrap()
                .contains("no API key")
        );
    }

    #[tokio::test]
    async fn mock_generation_error_becomes_failure_response() {
        let client = ClimateClient::with_mode(Config::default(), FetchMode::Mock).unwrap();
        let response = client
            .climate_trace_country_emissions(&["USA".to_string()], 2023, 2020)
            .await;

        assert_eq!(response.outcome, CallOutcome::Failure);
        assert!(response.payload.is_none());
        assert!(
            response
                .error_detail
                .as_deref()
                .unwrap()
                .contains("mock data generation failed")
        );
    }
}
