//! `climiq health` - probe every provider and report availability.

use colored::Colorize;

use crate::cli::args::{Cli, HealthArgs, OutputFormat};
use crate::core::client::ClimateClient;
use crate::core::models::CallOutcome;
use crate::error::Result;
use crate::util::format;

pub async fn execute(args: &HealthArgs, cli: &Cli) -> Result<()> {
    let client = crate::cli::build_client(cli)?;
    let report = client.health_check().await;

    if cli.effective_format() == OutputFormat::Json {
        println!("{}", crate::cli::to_json(&report, cli.pretty)?);
        if args.stats {
            println!("{}", crate::cli::to_json(&client.stats(), cli.pretty)?);
        }
        return Ok(());
    }

    render_human(&report, &client, args.stats, cli.no_color);
    Ok(())
}

fn render_human(
    report: &crate::core::health::HealthReport,
    client: &ClimateClient,
    with_stats: bool,
    no_color: bool,
) {
    println!("Provider health ({} mode probes run hybrid)", client.mode());
    println!("{:<18} {:<14} {:>10}  {}", "Provider", "Status", "Latency", "Available");
    println!("{:-<18} {:-<14} {:-<10}  {:-<9}", "", "", "", "");

    for probe in &report.probes {
        let status = colorize_status(probe.status, no_color);
        let mark = if probe.available { "yes" } else { "no" };
        println!(
            "{:<18} {:<14} {:>10}  {}",
            probe.provider.display_name(),
            status,
            format::duration(probe.elapsed),
            mark,
        );
    }

    println!();
    println!(
        "Overall health: {} ({}/{} providers available)",
        format::percent(report.overall_health),
        report.available_count,
        report.total_count,
    );

    if with_stats {
        let snap = client.stats();
        println!();
        println!(
            "Calls: {} total, {} live ok, {} failed, {} mocked (mean live latency {:.3}s)",
            snap.total_calls,
            snap.successful_calls,
            snap.failed_calls,
            snap.mock_calls,
            snap.average_response_time,
        );
    }
}

pub(crate) fn colorize_status(outcome: CallOutcome, no_color: bool) -> String {
    let raw = outcome.as_str();
    if no_color {
        return raw.to_string();
    }
    match outcome {
        CallOutcome::Success => raw.green().to_string(),
        CallOutcome::MockData => raw.yellow().to_string(),
        CallOutcome::Failure | CallOutcome::Timeout | CallOutcome::RateLimited => {
            raw.red().to_string()
        }
    }
}
