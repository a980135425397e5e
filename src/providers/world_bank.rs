//! World Bank payload types and mock generator.
//!
//! One endpoint family: indicator time series
//! (`/country/{code}/indicator/{id}?format=json`). The API returns a
//! two-element array of `[paging metadata, data rows]`, modeled here as a
//! tuple struct so the wire shape is preserved.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::models::{Params, Payload};
use crate::error::{ClimiqError, Result};
use crate::providers::climate_trace::country_name;

// =============================================================================
// Payload Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WbPage {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourceid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastupdated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbRef {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WbDataPoint {
    pub indicator: WbRef,
    pub country: WbRef,
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
    pub unit: String,
    pub obs_status: String,
    pub decimal: u8,
}

/// Indicator series: `[metadata, rows]`, serialized as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries(pub WbPage, pub Vec<WbDataPoint>);

// =============================================================================
// Mock Generator
// =============================================================================

/// Indicator series generator. Honors the `date` range parameter
/// (`START:END`), echoes country and indicator codes, and draws values
/// from per-indicator plausible ranges.
pub fn mock_indicator(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let country = params.str_of("country").unwrap_or("USA").to_string();
    let indicator = params
        .str_of("indicator")
        .unwrap_or("EN.ATM.CO2E.KT")
        .to_string();
    let date_range = params.str_of("date").unwrap_or("2020:2023");

    let (start_year, end_year) = parse_date_range(date_range)?;

    let points: Vec<WbDataPoint> = (start_year..=end_year)
        .map(|year| {
            let value = if indicator.contains("CO2") {
                // kt CO2
                rng.gen_range(1_000_000.0..10_000_000.0)
            } else if indicator.contains("ELEC") {
                // kWh per capita
                rng.gen_range(1_000.0..15_000.0)
            } else if indicator.contains("FRST") {
                // % land area
                rng.gen_range(10.0..80.0)
            } else {
                rng.gen_range(0.0..1_000.0)
            };

            WbDataPoint {
                indicator: WbRef {
                    id: indicator.clone(),
                    value: format!("Indicator {indicator}"),
                },
                country: WbRef {
                    id: country.clone(),
                    value: country_name(&country),
                },
                countryiso3code: country.clone(),
                date: year.to_string(),
                value: Some(value),
                unit: String::new(),
                obs_status: String::new(),
                decimal: 2,
            }
        })
        .collect();

    let page = WbPage {
        page: 1,
        pages: 1,
        per_page: 50,
        total: points.len() as u32,
        sourceid: Some("2".to_string()),
        lastupdated: Some("2024-01-01".to_string()),
    };

    Ok(Payload::Indicator(IndicatorSeries(page, points)))
}

fn parse_date_range(raw: &str) -> Result<(i64, i64)> {
    let invalid = || ClimiqError::MockData {
        endpoint: "indicator".to_string(),
        reason: format!("invalid date range '{raw}' (expected START:END)"),
    };
    let (start, end) = raw.split_once(':').ok_or_else(invalid)?;
    let start_year: i64 = start.parse().map_err(|_| invalid())?;
    let end_year: i64 = end.parse().map_err(|_| invalid())?;
    if start_year > end_year {
        return Err(invalid());
    }
    Ok((start_year, end_year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_for(params: &Params) -> IndicatorSeries {
        match mock_indicator(params).unwrap() {
            Payload::Indicator(series) => series,
            other => panic!("expected indicator payload, got {other:?}"),
        }
    }

    #[test]
    fn series_covers_requested_years() {
        let params = Params::new()
            .with("country", "DEU")
            .with("indicator", "EN.ATM.CO2E.KT")
            .with("date", "2020:2022");
        let IndicatorSeries(page, points) = series_for(&params);

        assert_eq!(points.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(points[0].date, "2020");
        assert_eq!(points[2].date, "2022");
        for point in &points {
            assert_eq!(point.countryiso3code, "DEU");
            assert_eq!(point.indicator.id, "EN.ATM.CO2E.KT");
            assert!(point.value.is_some());
        }
    }

    #[test]
    fn wire_shape_is_a_two_element_array() {
        let series = series_for(&Params::new());
        let value = serde_json::to_value(&series).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert!(array[0].get("page").is_some());
        assert!(array[1].is_array());
    }

    #[test]
    fn forest_indicator_values_are_percentages() {
        let params = Params::new()
            .with("indicator", "AG.LND.FRST.ZS")
            .with("date", "2021:2021");
        let IndicatorSeries(_, points) = series_for(&params);
        let value = points[0].value.unwrap();
        assert!((10.0..80.0).contains(&value));
    }

    #[test]
    fn malformed_range_is_a_generation_error() {
        let params = Params::new().with("date", "2020-2023");
        assert!(mock_indicator(&params).is_err());

        let params = Params::new().with("date", "2023:2020");
        assert!(mock_indicator(&params).is_err());
    }
}
