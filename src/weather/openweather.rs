use super::mock::MockWeatherClient;
use super::types::WeatherRecord;
use crate::config::Config;
use crate::utils::{truncate_body, validate_coordinates};
use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("Error fetching weather data")]
    Fetch(#[source] FetchFailure),
}

/// Why a provider call failed after the request was attempted.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: StatusCode, body: String },
    #[error("response contained no weather conditions")]
    NoConditions,
}

pub struct OpenWeatherClient {
    client: Client,
    config: Config,
    mock: MockWeatherClient,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("weather-api/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            config,
            mock: MockWeatherClient::new(),
        })
    }

    pub fn is_demo(&self) -> bool {
        self.config.is_demo()
    }

    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        if self.is_demo() {
            return Ok(self.mock.current_by_city(city));
        }

        if city.trim().is_empty() {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        tracing::debug!("Requesting current weather for city {:?}", city);
        self.request(&[
            ("q", city),
            ("appid", self.config.weather_api_key.as_str()),
            ("units", "metric"),
        ])
        .await
        .map_err(|e| match e {
            RequestError::Rejected(status) => {
                tracing::warn!("Provider rejected city {:?} with HTTP {}", city, status);
                WeatherError::CityNotFound(city.to_string())
            }
            RequestError::Failed(failure) => WeatherError::Fetch(failure),
        })
    }

    pub async fn fetch_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherRecord, WeatherError> {
        if self.is_demo() {
            return Ok(self.mock.current_by_coordinates(lat, lon));
        }

        if let Err(reason) = validate_coordinates(lat, lon) {
            tracing::warn!("{}", reason);
            return Err(WeatherError::InvalidCoordinates);
        }

        tracing::debug!("Requesting current weather for ({}, {})", lat, lon);
        let (lat_param, lon_param) = (lat.to_string(), lon.to_string());
        self.request(&[
            ("lat", lat_param.as_str()),
            ("lon", lon_param.as_str()),
            ("appid", self.config.weather_api_key.as_str()),
            ("units", "metric"),
        ])
        .await
        .map_err(|e| match e {
            RequestError::Rejected(status) => {
                tracing::warn!("Provider rejected ({}, {}) with HTTP {}", lat, lon, status);
                WeatherError::InvalidCoordinates
            }
            RequestError::Failed(failure) => WeatherError::Fetch(failure),
        })
    }

    async fn request(&self, params: &[(&str, &str)]) -> Result<WeatherRecord, RequestError> {
        let response = self
            .client
            .get(&self.config.weather_api_url)
            .query(params)
            .send()
            .await
            .map_err(FetchFailure::from)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(RequestError::Rejected(status));
        }

        let body = response.text().await.map_err(FetchFailure::from)?;
        if !status.is_success() {
            return Err(FetchFailure::ApiError {
                status,
                body: truncate_body(&body),
            }
            .into());
        }

        let record: WeatherRecord = serde_json::from_str(&body).map_err(FetchFailure::from)?;
        if !record.is_valid() {
            return Err(FetchFailure::NoConditions.into());
        }
        Ok(record)
    }
}

/// Outcome of a single provider round trip, before it is given a
/// lookup-specific meaning.
enum RequestError {
    Rejected(StatusCode),
    Failed(FetchFailure),
}

impl From<FetchFailure> for RequestError {
    fn from(failure: FetchFailure) -> Self {
        RequestError::Failed(failure)
    }
}
