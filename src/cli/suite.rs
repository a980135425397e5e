//! `climiq suite` - exercise every endpoint family once.
//!
//! The CLI counterpart of the comprehensive API battery: one
//! representative call per endpoint family, reported per endpoint with
//! the accumulated statistics at the end.

use serde::Serialize;

use crate::cli::args::{Cli, OutputFormat, SuiteArgs};
use crate::core::client::ClimateClient;
use crate::core::models::{ApiResponse, DataOrigin};
use crate::core::provider::{Endpoint, Provider};
use crate::core::stats::StatsSnapshot;
use crate::error::Result;
use crate::providers::carbon_interface::EstimateRequest;
use crate::util::format;

#[derive(Debug, Serialize)]
struct SuiteRow {
    endpoint: Endpoint,
    provider: Provider,
    outcome: crate::core::models::CallOutcome,
    origin: DataOrigin,
    elapsed_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
struct SuiteReport {
    rows: Vec<SuiteRow>,
    stats: StatsSnapshot,
}

pub async fn execute(args: &SuiteArgs, cli: &Cli) -> Result<()> {
    let providers = resolve_providers(args)?;
    let client = crate::cli::build_client(cli)?;

    let mut rows = Vec::new();
    for provider in &providers {
        run_provider(&client, *provider, &mut rows).await;
    }

    let report = SuiteReport {
        rows,
        stats: client.stats(),
    };

    if cli.effective_format() == OutputFormat::Json {
        println!("{}", crate::cli::to_json(&report, cli.pretty)?);
        return Ok(());
    }

    render_human(&report, cli.no_color);
    Ok(())
}

fn resolve_providers(args: &SuiteArgs) -> Result<Vec<Provider>> {
    args.provider.as_ref().map_or_else(
        || Ok(Provider::ALL.to_vec()),
        |names| names.iter().map(|n| Provider::from_cli_name(n)).collect(),
    )
}

async fn run_provider(client: &ClimateClient, provider: Provider, rows: &mut Vec<SuiteRow>) {
    match provider {
        Provider::ClimateTrace => {
            push(rows, Endpoint::Sectors, client.climate_trace_sectors().await);
            push(rows, Endpoint::Countries, client.climate_trace_countries().await);
            push(rows, Endpoint::Subsectors, client.climate_trace_subsectors().await);
            push(rows, Endpoint::Continents, client.climate_trace_continents().await);
            push(rows, Endpoint::Gases, client.climate_trace_gases().await);
            push(rows, Endpoint::Groups, client.climate_trace_groups().await);
            push(
                rows,
                Endpoint::AssetEmissions,
                client
                    .climate_trace_emissions(
                        &["USA".to_string(), "CHN".to_string()],
                        &["power".to_string()],
                        &[2022],
                        None,
                    )
                    .await,
            );
            push(
                rows,
                Endpoint::AssetSearch,
                client
                    .search_climate_trace_assets(Some("USA"), Some("power"), 5, 2022)
                    .await,
            );
            push(
                rows,
                Endpoint::CountryEmissions,
                client
                    .climate_trace_country_emissions(&["USA".to_string()], 2022, 2022)
                    .await,
            );
            push(
                rows,
                Endpoint::AdminSearch,
                client.climate_trace_admin_search(Some("Cali"), None).await,
            );
            push(
                rows,
                Endpoint::AdminGeometry,
                client.climate_trace_admin_geometry("ADMIN_1").await,
            );
        }
        Provider::CarbonInterface => {
            let request = EstimateRequest::Electricity {
                value: 100.0,
                unit: "kwh".to_string(),
                country: "us".to_string(),
            };
            push(
                rows,
                Endpoint::CarbonEstimate,
                client.calculate_carbon_footprint(&request).await,
            );
        }
        Provider::OpenWeather => {
            push(
                rows,
                Endpoint::CurrentWeather,
                client.get_weather_data("New York,US").await,
            );
            push(rows, Endpoint::AirQuality, client.get_air_quality(40.7, -74.0).await);
        }
        Provider::NasaPower => {
            push(
                rows,
                Endpoint::PowerDaily,
                client
                    .get_nasa_power_data(
                        40.7,
                        -74.0,
                        &["ALLSKY_SFC_SW_DWN".to_string(), "WS10M".to_string()],
                        "20240101",
                        "20240103",
                    )
                    .await,
            );
        }
        Provider::WorldBank => {
            push(
                rows,
                Endpoint::Indicator,
                client
                    .get_world_bank_indicator("USA", "EN.ATM.CO2E.KT", 2020, 2022)
                    .await,
            );
        }
        Provider::UnSdg => {
            push(rows, Endpoint::SdgGoals, client.get_un_sdg_goals().await);
            push(rows, Endpoint::SdgTargets, client.get_un_sdg_targets("13").await);
        }
    }
}

fn push(rows: &mut Vec<SuiteRow>, endpoint: Endpoint, response: ApiResponse) {
    rows.push(SuiteRow {
        endpoint,
        provider: endpoint.provider(),
        outcome: response.outcome,
        origin: response.origin,
        elapsed_seconds: response.elapsed.as_secs_f64(),
        detail: response.error_detail,
    });
}

fn render_human(report: &SuiteReport, no_color: bool) {
    println!("{:<18} {:<18} {:<14} {:>10}", "Provider", "Endpoint", "Outcome", "Latency");
    println!("{:-<18} {:-<18} {:-<14} {:-<10}", "", "", "", "");

    for row in &report.rows {
        println!(
            "{:<18} {:<18} {:<14} {:>10}",
            row.provider.display_name(),
            row.endpoint.label(),
            crate::cli::health::colorize_status(row.outcome, no_color),
            format::duration(std::time::Duration::from_secs_f64(row.elapsed_seconds)),
        );
        if let Some(detail) = &row.detail {
            println!("{:<18} {:<18} ({detail})", "", "");
        }
    }

    let stats = &report.stats;
    println!();
    println!(
        "Totals: {} calls, {} live ok ({}), {} failed ({}), {} mocked ({})",
        stats.total_calls,
        stats.successful_calls,
        format::percent(stats.success_rate),
        stats.failed_calls,
        format::percent(stats.failure_rate),
        stats.mock_calls,
        format::percent(stats.mock_rate),
    );
}
