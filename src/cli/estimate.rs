//! `climiq estimate` - carbon footprint estimates.

use crate::cli::args::{Cli, EstimateCommand, OutputFormat};
use crate::core::models::Payload;
use crate::error::{ClimiqError, Result};
use crate::providers::carbon_interface::{EstimateRequest, FlightLeg};

pub async fn execute(command: &EstimateCommand, cli: &Cli) -> Result<()> {
    let request = to_request(command)?;
    let client = crate::cli::build_client(cli)?;
    let response = client.calculate_carbon_footprint(&request).await;

    if cli.effective_format() == OutputFormat::Json {
        println!("{}", crate::cli::to_json(&response, cli.pretty)?);
        return Ok(());
    }

    crate::cli::fetch::print_outcome_line(&response, cli.no_color);
    if let Some(Payload::CarbonEstimate(estimate)) = &response.payload {
        let attrs = &estimate.data.attributes;
        println!(
            "{} estimate: {:.2} kg CO2 ({:.2} lb, {:.4} t)",
            request.kind(),
            attrs.carbon_kg,
            attrs.carbon_lb,
            attrs.carbon_mt,
        );
    }
    Ok(())
}

fn to_request(command: &EstimateCommand) -> Result<EstimateRequest> {
    Ok(match command {
        EstimateCommand::Electricity {
            value,
            unit,
            country,
        } => EstimateRequest::Electricity {
            value: *value,
            unit: unit.clone(),
            country: country.clone(),
        },
        EstimateCommand::Vehicle { distance, unit } => EstimateRequest::Vehicle {
            distance_value: *distance,
            distance_unit: unit.clone(),
            vehicle_model_id: None,
        },
        EstimateCommand::Flight { passengers, legs } => EstimateRequest::Flight {
            passengers: *passengers,
            legs: legs.iter().map(|leg| parse_leg(leg)).collect::<Result<_>>()?,
        },
        EstimateCommand::Shipping {
            weight,
            weight_unit,
            distance,
            distance_unit,
            method,
        } => EstimateRequest::Shipping {
            weight_value: *weight,
            weight_unit: weight_unit.clone(),
            distance_value: *distance,
            distance_unit: distance_unit.clone(),
            transport_method: method.clone(),
        },
    })
}

fn parse_leg(raw: &str) -> Result<FlightLeg> {
    let (departure, destination) = raw.split_once(':').ok_or_else(|| {
        ClimiqError::Config(format!("invalid flight leg '{raw}' (expected DEP:DST)"))
    })?;
    Ok(FlightLeg {
        departure_airport: departure.to_lowercase(),
        destination_airport: destination.to_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leg_parsing_splits_on_colon() {
        let leg = parse_leg("LAX:JFK").unwrap();
        assert_eq!(leg.departure_airport, "lax");
        assert_eq!(leg.destination_airport, "jfk");
        assert!(parse_leg("LAXJFK").is_err());
    }
}
