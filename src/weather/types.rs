use serde::{Deserialize, Serialize};

/// Current weather observation for one location.
///
/// Field names on the wire mirror the provider's current-weather payload
/// (`name`, `main.temp`, `weather[].icon`, ...) so the same type decodes the
/// upstream response and is served to API clients unchanged. Unknown upstream
/// fields are dropped during decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(rename = "name", default)]
    pub location_name: String,
    #[serde(default)]
    pub main: MainReadings,
    #[serde(rename = "weather", default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub sys: Sys,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    #[serde(rename = "temp", default)]
    pub temperature_c: f64,
    #[serde(rename = "feels_like", default)]
    pub feels_like_c: f64,
    #[serde(rename = "humidity", default)]
    pub humidity_pct: i32,
    #[serde(rename = "pressure", default)]
    pub pressure_hpa: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "main", default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "icon", default)]
    pub icon_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(rename = "speed", default)]
    pub speed_ms: f64,
    #[serde(rename = "deg", default)]
    pub direction_deg: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(rename = "country", default)]
    pub country_code: String,
}

impl WeatherRecord {
    /// A record is only usable when the provider reported at least one condition.
    pub fn is_valid(&self) -> bool {
        !self.conditions.is_empty()
    }
}

impl Condition {
    pub fn new(summary: &str, description: &str, icon_id: &str) -> Self {
        Self {
            summary: summary.to_string(),
            description: description.to_string(),
            icon_id: icon_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn london_payload() -> serde_json::Value {
        json!({
            "coord": { "lon": -0.1257, "lat": 51.5085 },
            "weather": [
                { "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }
            ],
            "base": "stations",
            "main": {
                "temp": 14.2,
                "feels_like": 13.6,
                "temp_min": 12.9,
                "temp_max": 15.4,
                "pressure": 1012,
                "humidity": 77,
                "sea_level": 1012
            },
            "visibility": 10000,
            "wind": { "speed": 4.63, "deg": 250, "gust": 8.1 },
            "clouds": { "all": 75 },
            "dt": 1_700_000_000,
            "sys": { "type": 2, "id": 2075535, "country": "GB", "sunrise": 1, "sunset": 2 },
            "timezone": 0,
            "id": 2643743,
            "name": "London",
            "cod": 200
        })
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let record: WeatherRecord = serde_json::from_value(london_payload()).unwrap();

        assert_eq!(record.location_name, "London");
        assert_eq!(record.main.temperature_c, 14.2);
        assert_eq!(record.main.feels_like_c, 13.6);
        assert_eq!(record.main.humidity_pct, 77);
        assert_eq!(record.main.pressure_hpa, 1012);
        assert_eq!(record.conditions, vec![Condition::new("Clouds", "broken clouds", "04d")]);
        assert_eq!(record.wind.speed_ms, 4.63);
        assert_eq!(record.wind.direction_deg, 250);
        assert_eq!(record.sys.country_code, "GB");
        assert!(record.is_valid());
    }

    #[test]
    fn test_serializes_with_provider_field_names() {
        let record: WeatherRecord = serde_json::from_value(london_payload()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["name"], "London");
        assert_eq!(value["main"]["temp"], 14.2);
        assert_eq!(value["main"]["feels_like"], 13.6);
        assert_eq!(value["main"]["humidity"], 77);
        assert_eq!(value["main"]["pressure"], 1012);
        assert_eq!(value["weather"][0]["main"], "Clouds");
        assert_eq!(value["weather"][0]["description"], "broken clouds");
        assert_eq!(value["weather"][0]["icon"], "04d");
        assert_eq!(value["wind"]["speed"], 4.63);
        assert_eq!(value["wind"]["deg"], 250);
        assert_eq!(value["sys"]["country"], "GB");
        // extras from the provider are not echoed back
        assert!(value.get("coord").is_none());
        assert!(value["main"].get("temp_min").is_none());
    }

    #[test]
    fn test_missing_sections_decode_to_defaults() {
        let record: WeatherRecord = serde_json::from_value(json!({ "name": "Nowhere" })).unwrap();

        assert_eq!(record.location_name, "Nowhere");
        assert_eq!(record.main, MainReadings::default());
        assert!(record.conditions.is_empty());
        assert!(!record.is_valid());
    }
}
