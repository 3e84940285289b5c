use super::types::*;

/// Fixed observations served when no provider API key is configured.
pub struct MockWeatherClient;

impl MockWeatherClient {
    pub fn new() -> Self {
        Self
    }

    pub fn current_by_city(&self, city: &str) -> WeatherRecord {
        WeatherRecord {
            location_name: city.to_string(),
            main: MainReadings {
                temperature_c: 22.5,
                feels_like_c: 24.0,
                humidity_pct: 65,
                pressure_hpa: 1013,
            },
            conditions: vec![Condition::new("Clear", "clear sky", "01d")],
            wind: Wind {
                speed_ms: 3.5,
                direction_deg: 180,
            },
            sys: Sys {
                country_code: "Demo".to_string(),
            },
        }
    }

    pub fn current_by_coordinates(&self, lat: f64, lon: f64) -> WeatherRecord {
        WeatherRecord {
            location_name: format!(
                "Location ({}, {})",
                display_coordinate(lat),
                display_coordinate(lon)
            ),
            main: MainReadings {
                temperature_c: 20.0,
                feels_like_c: 21.5,
                humidity_pct: 70,
                pressure_hpa: 1015,
            },
            conditions: vec![Condition::new("Clouds", "scattered clouds", "03d")],
            wind: Wind {
                speed_ms: 2.8,
                direction_deg: 220,
            },
            sys: Sys {
                country_code: "Demo".to_string(),
            },
        }
    }
}

impl Default for MockWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest round-trip form with at least one fractional digit: `20.0`,
/// `51.5074`. Magnitudes outside `[1e-3, 1e7)` use `E` notation with a
/// decimal mantissa: `1.0E-7`, `1.5E16`.
fn display_coordinate(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}
