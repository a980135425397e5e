//! OpenWeatherMap payload types and mock generators.
//!
//! Two endpoint families: current conditions (`/weather`) and air quality
//! (`/air_pollution`). Field names follow the OpenWeatherMap 2.5 API.

use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::models::{Params, Payload};
use crate::error::Result;

// =============================================================================
// Payload Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sys_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current conditions from `/weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub coord: Coord,
    pub weather: Vec<WeatherCondition>,
    pub base: String,
    pub main: WeatherMain,
    pub visibility: i32,
    pub wind: Wind,
    pub clouds: Clouds,
    pub dt: i64,
    pub sys: Sys,
    pub timezone: i32,
    pub id: u64,
    pub name: String,
    pub cod: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiMain {
    pub aqi: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirComponents {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityEntry {
    pub main: AqiMain,
    pub components: AirComponents,
    pub dt: i64,
}

/// Air quality report from `/air_pollution`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub coord: Coord,
    pub list: Vec<AirQualityEntry>,
}

// =============================================================================
// Mock Generators
// =============================================================================

const CONDITIONS: &[(&str, &str)] = &[
    ("Clear", "clear sky"),
    ("Clouds", "few clouds"),
    ("Rain", "light rain"),
    ("Snow", "heavy snow"),
    ("Thunderstorm", "thunderstorm"),
];

/// Current weather generator. Echoes the requested location name back and
/// keeps temp_min <= temp <= temp_max.
pub fn mock_current_weather(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let location = params.str_of("q").unwrap_or("New York,US");
    let (city, country) = location
        .split_once(',')
        .map_or((location, "US"), |(c, n)| (c.trim(), n.trim()));

    let base_temp = rng.gen_range(-10.0..35.0);
    let condition = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];
    let now = Utc::now();

    let weather = CurrentWeather {
        coord: Coord {
            lon: rng.gen_range(-180.0..180.0),
            lat: rng.gen_range(-90.0..90.0),
        },
        weather: vec![WeatherCondition {
            id: rng.gen_range(200..800),
            main: condition.0.to_string(),
            description: condition.1.to_string(),
            icon: "01d".to_string(),
        }],
        base: "stations".to_string(),
        main: WeatherMain {
            temp: base_temp,
            feels_like: base_temp + rng.gen_range(-5.0..5.0),
            temp_min: base_temp - rng.gen_range(0.0..10.0),
            temp_max: base_temp + rng.gen_range(0.0..10.0),
            pressure: rng.gen_range(980..=1030),
            humidity: rng.gen_range(30..=90),
        },
        visibility: rng.gen_range(1_000..=10_000),
        wind: Wind {
            speed: rng.gen_range(0.0..20.0),
            deg: rng.gen_range(0..360),
        },
        clouds: Clouds {
            all: rng.gen_range(0..=100),
        },
        dt: now.timestamp(),
        sys: Sys {
            sys_type: Some(1),
            id: Some(rng.gen_range(1_000..10_000)),
            country: country.to_uppercase(),
            sunrise: (now - ChronoDuration::hours(2)).timestamp(),
            sunset: (now + ChronoDuration::hours(8)).timestamp(),
        },
        timezone: rng.gen_range(-43_200..=43_200),
        id: rng.gen_range(1_000_000..10_000_000),
        name: city.to_string(),
        cod: 200,
    };

    Ok(Payload::Weather(Box::new(weather)))
}

/// Air quality generator. Echoes the requested coordinates back.
pub fn mock_air_quality(params: &Params) -> Result<Payload> {
    let mut rng = rand::thread_rng();
    let lat = params.f64_of("lat").unwrap_or(40.7);
    let lon = params.f64_of("lon").unwrap_or(-74.0);

    Ok(Payload::AirQuality(AirQualityReport {
        coord: Coord { lon, lat },
        list: vec![AirQualityEntry {
            main: AqiMain {
                aqi: rng.gen_range(1..=5),
            },
            components: AirComponents {
                co: rng.gen_range(200.0..400.0),
                no: rng.gen_range(0.0..50.0),
                no2: rng.gen_range(10.0..100.0),
                o3: rng.gen_range(50.0..150.0),
                so2: rng.gen_range(5.0..50.0),
                pm2_5: rng.gen_range(5.0..50.0),
                pm10: rng.gen_range(10.0..100.0),
                nh3: rng.gen_range(0.0..20.0),
            },
            dt: Utc::now().timestamp(),
        }],
    }))
}
