//! Integration tests for transport classification and the fallback policy.
//!
//! Drives the client against wiremock endpoints to verify:
//! - Success classification with typed payloads
//! - Rate limit (429), HTTP error, timeout, and connection-refused paths
//! - Live / Mock / Hybrid substitution behavior
//! - Statistics accounting across outcomes

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use climiq::{CallOutcome, ClimateClient, Config, DataOrigin, FetchMode, Payload};

/// Config with every provider pointed at `base` and a short timeout.
fn test_config(base: &str, timeout_secs: u64) -> Config {
    let mut config = Config::default();
    config.endpoints.climate_trace = base.to_string();
    config.endpoints.carbon_interface = base.to_string();
    config.endpoints.open_weather = base.to_string();
    config.endpoints.nasa_power = base.to_string();
    config.endpoints.world_bank = base.to_string();
    config.endpoints.un_sdg = base.to_string();
    config.general.timeout_seconds = timeout_secs;
    config
}

// =============================================================================
// Success Classification
// =============================================================================

#[tokio::test]
async fn live_success_returns_typed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/sectors"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"power": 1, "waste": 8})),
        )
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Live).unwrap();
    let response = client.climate_trace_sectors().await;

    assert_eq!(response.outcome, CallOutcome::Success);
    assert_eq!(response.origin, DataOrigin::Live);
    let Some(Payload::Sectors(sectors)) = &response.payload else {
        panic!("expected typed sectors payload, got {:?}", response.payload);
    };
    assert_eq!(sectors.get("power"), Some(&1));

    let context = response.context.expect("context should be attached");
    assert_eq!(context.status_code, Some(200));
    assert!(context.url.ends_with("/definitions/sectors"));
}

#[tokio::test]
async fn live_201_counts_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimates"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {
                "id": "abc",
                "type": "estimate",
                "attributes": {
                    "country": "us",
                    "state": null,
                    "estimated_at": "2024-01-01T00:00:00Z",
                    "carbon_g": 40000.0,
                    "carbon_lb": 88.18,
                    "carbon_kg": 40.0,
                    "carbon_mt": 0.04
                }
            }
        })))
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri(), 5);
    config.credentials.carbon_interface_api_key = Some("test-token".to_string());
    let client = ClimateClient::with_mode(config, FetchMode::Live).unwrap();

    let request = climiq::providers::carbon_interface::EstimateRequest::Electricity {
        value: 100.0,
        unit: "kwh".to_string(),
        country: "us".to_string(),
    };
    let response = client.calculate_carbon_footprint(&request).await;

    assert_eq!(response.outcome, CallOutcome::Success);
    let Some(Payload::CarbonEstimate(estimate)) = &response.payload else {
        panic!("expected estimate payload");
    };
    assert!((estimate.data.attributes.carbon_kg - 40.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn unexpected_shape_degrades_to_raw_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/countries"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"weird": true})),
        )
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Live).unwrap();
    let response = client.climate_trace_countries().await;

    assert_eq!(response.outcome, CallOutcome::Success);
    let Some(Payload::Json(value)) = &response.payload else {
        panic!("expected raw json payload");
    };
    assert_eq!(value["weird"], true);
}

#[tokio::test]
async fn non_json_body_is_kept_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/gases"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text body"))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Live).unwrap();
    let response = client.climate_trace_gases().await;

    assert_eq!(response.outcome, CallOutcome::Success);
    assert_eq!(
        response.payload,
        Some(Payload::Text("plain text body".to_string()))
    );
}

// =============================================================================
// Failure Classification (Live mode: verbatim, no substitution)
// =============================================================================

#[tokio::test]
async fn live_429_is_rate_limited_without_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sdg/Goal/List"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Live).unwrap();
    let response = client.get_un_sdg_goals().await;

    assert_eq!(response.outcome, CallOutcome::RateLimited);
    assert!(response.payload.is_none());
    assert!(response.error_detail.as_deref().unwrap().contains("429"));

    let snap = client.stats();
    assert_eq!(snap.total_calls, 1);
    assert_eq!(snap.failed_calls, 1);
    assert_eq!(snap.mock_calls, 0);
}

#[tokio::test]
async fn live_http_error_includes_status_and_snippet() {
    let server = MockServer::start().await;
    let long_body = "x".repeat(500);
    Mock::given(method("GET"))
        .and(path("/sdg/Goal/List"))
        .respond_with(ResponseTemplate::new(500).set_body_string(long_body))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Live).unwrap();
    let response = client.get_un_sdg_goals().await;

    assert_eq!(response.outcome, CallOutcome::Failure);
    let detail = response.error_detail.unwrap();
    assert!(detail.contains("HTTP 500"));
    // body snippet is truncated to 200 characters
    assert!(detail.len() < 250);
}

#[tokio::test]
async fn live_timeout_is_classified_without_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sdg/Goal/List"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 1), FetchMode::Live).unwrap();
    let response = client.get_un_sdg_goals().await;

    assert_eq!(response.outcome, CallOutcome::Timeout);
    assert!(response.payload.is_none());
    assert!(response.error_detail.as_deref().unwrap().contains("timeout"));
}

#[tokio::test]
async fn live_connection_refused_is_a_failure() {
    // Nothing listens on this port.
    let client = ClimateClient::with_mode(
        test_config("http://127.0.0.1:59999", 2),
        FetchMode::Live,
    )
    .unwrap();
    let response = client.get_un_sdg_goals().await;

    assert_eq!(response.outcome, CallOutcome::Failure);
    assert!(response.payload.is_none());
    assert!(response.error_detail.is_some());
}

// =============================================================================
// Hybrid Mode Substitution
// =============================================================================

#[tokio::test]
async fn hybrid_timeout_substitutes_mock_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sdg/Goal/List"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 1), FetchMode::Hybrid).unwrap();
    let response = client.get_un_sdg_goals().await;

    assert_eq!(response.outcome, CallOutcome::MockData);
    assert_eq!(response.origin, DataOrigin::Mock);
    assert!(response.error_detail.as_deref().unwrap().contains("timeout"));
    let Some(Payload::SdgGoals(goals)) = &response.payload else {
        panic!("expected goals payload");
    };
    assert_eq!(goals.len(), 17);

    // the attempt, its failure, and the substitution are all accounted
    let snap = client.stats();
    assert_eq!(snap.total_calls, 1);
    assert_eq!(snap.failed_calls, 1);
    assert_eq!(snap.mock_calls, 1);
}

#[tokio::test]
async fn hybrid_429_substitutes_mock_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/sectors"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Hybrid).unwrap();
    let response = client.climate_trace_sectors().await;

    assert_eq!(response.outcome, CallOutcome::MockData);
    assert!(
        response
            .error_detail
            .as_deref()
            .unwrap()
            .contains("rate limited")
    );
    assert!(matches!(response.payload, Some(Payload::Sectors(_))));
}

#[tokio::test]
async fn hybrid_500_substitutes_mock_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/sectors"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Hybrid).unwrap();
    let response = client.climate_trace_sectors().await;

    assert_eq!(response.outcome, CallOutcome::MockData);
    assert!(response.error_detail.as_deref().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn hybrid_success_passes_through_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/sectors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"power": 1})))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Hybrid).unwrap();
    let response = client.climate_trace_sectors().await;

    assert_eq!(response.outcome, CallOutcome::Success);
    assert_eq!(response.origin, DataOrigin::Live);
}

// =============================================================================
// Mock Mode
// =============================================================================

#[tokio::test]
async fn mock_mode_never_touches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Mock).unwrap();

    let _ = client.climate_trace_sectors().await;
    let _ = client.get_un_sdg_goals().await;
    let _ = client
        .climate_trace_country_emissions(&["USA".to_string()], 2022, 2022)
        .await;

    let received = server.received_requests().await.unwrap();
    assert!(
        received.is_empty(),
        "mock mode must not dispatch requests, saw {}",
        received.len()
    );

    let snap = client.stats();
    assert_eq!(snap.total_calls, 3);
    assert_eq!(snap.mock_calls, 3);
    assert_eq!(snap.successful_calls, 0);
}

// =============================================================================
// Invariants and Statistics
// =============================================================================

#[tokio::test]
async fn payload_presence_matches_outcome_across_modes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sdg/Goal/List"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    for mode in [FetchMode::Live, FetchMode::Hybrid, FetchMode::Mock] {
        let client = ClimateClient::with_mode(test_config(&server.uri(), 2), mode).unwrap();
        let response = client.get_un_sdg_goals().await;
        assert_eq!(
            response.payload.is_some(),
            response.outcome.is_usable(),
            "invariant violated in {mode} mode"
        );
        assert_eq!(
            response.origin == DataOrigin::Mock,
            response.outcome == CallOutcome::MockData,
            "origin tag violated in {mode} mode"
        );
    }
}

#[tokio::test]
async fn successful_calls_update_the_latency_mean() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/sectors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"power": 1})))
        .mount(&server)
        .await;

    let client =
        ClimateClient::with_mode(test_config(&server.uri(), 5), FetchMode::Live).unwrap();
    for _ in 0..3 {
        let response = client.climate_trace_sectors().await;
        assert_eq!(response.outcome, CallOutcome::Success);
    }

    let snap = client.stats();
    assert_eq!(snap.successful_calls, 3);
    assert!(snap.average_response_time > 0.0);

    client.reset_stats();
    let snap = client.stats();
    assert_eq!(snap.total_calls, 0);
    assert!((snap.average_response_time).abs() < f64::EPSILON);
}
