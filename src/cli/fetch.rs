//! `climiq weather` and `climiq emissions` - representative fetch commands.

use crate::cli::args::{Cli, EmissionsArgs, OutputFormat, WeatherArgs};
use crate::core::models::{ApiResponse, Payload};
use crate::error::Result;
use crate::util::format;

pub async fn weather(args: &WeatherArgs, cli: &Cli) -> Result<()> {
    let client = crate::cli::build_client(cli)?;
    let response = client.get_weather_data(&args.location).await;

    if cli.effective_format() == OutputFormat::Json {
        println!("{}", crate::cli::to_json(&response, cli.pretty)?);
        return Ok(());
    }

    print_outcome_line(&response, cli.no_color);
    if let Some(Payload::Weather(weather)) = &response.payload {
        println!(
            "{}: {:.1}C, {} (humidity {}%, wind {:.1} m/s)",
            weather.name,
            weather.main.temp,
            weather
                .weather
                .first()
                .map_or("unknown", |c| c.description.as_str()),
            weather.main.humidity,
            weather.wind.speed,
        );
    }
    Ok(())
}

pub async fn emissions(args: &EmissionsArgs, cli: &Cli) -> Result<()> {
    let client = crate::cli::build_client(cli)?;
    let response = client
        .climate_trace_country_emissions(&args.countries, args.since, args.to)
        .await;

    if cli.effective_format() == OutputFormat::Json {
        println!("{}", crate::cli::to_json(&response, cli.pretty)?);
        return Ok(());
    }

    print_outcome_line(&response, cli.no_color);
    if let Some(Payload::CountryEmissions(rows)) = &response.payload {
        println!("{:<8} {:<6} {:>16}", "Country", "Year", "co2e_100yr (t)");
        println!("{:-<8} {:-<6} {:-<16}", "", "", "");
        for row in rows {
            let co2e = row
                .emissions
                .iter()
                .find(|gv| gv.gas == "co2e_100yr")
                .map_or(0.0, |gv| gv.value);
            println!("{:<8} {:<6} {:>16.0}", row.country.code, row.year, co2e);
        }
    }
    Ok(())
}

pub(crate) fn print_outcome_line(response: &ApiResponse, no_color: bool) {
    let status = crate::cli::health::colorize_status(response.outcome, no_color);
    let origin = match response.origin {
        crate::core::models::DataOrigin::Live => "live",
        crate::core::models::DataOrigin::Mock => "mock",
    };
    print!(
        "[{status}] {origin} data in {}",
        format::duration(response.elapsed)
    );
    match &response.error_detail {
        Some(detail) => println!(" - {detail}"),
        None => println!(),
    }
}
