use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::error::Error as _;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{
    config::Config,
    service::WeatherService,
    weather::{openweather::WeatherError, types::WeatherRecord},
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: Arc<WeatherService>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error rendered to API clients as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn from_lookup(status: StatusCode, err: WeatherError) -> Self {
        match &err {
            WeatherError::Fetch(failure) => {
                tracing::error!("Weather lookup failed: {} ({})", err, failure);
            }
            _ => tracing::warn!("Weather lookup rejected: {}", err),
        }
        if let Some(source) = err.source().and_then(|s| s.source()) {
            tracing::debug!("Underlying cause: {}", source);
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// Route handlers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        service: "Weather API",
    })
}

pub async fn weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherRecord>, ApiError> {
    // Every failure on this route is reported as 404
    state
        .weather
        .get_by_city(&city)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_lookup(StatusCode::NOT_FOUND, e))
}

pub async fn weather_by_coordinates(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::warn!("Rejected coordinates query: {}", rejection);
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    state
        .weather
        .get_by_coordinates(params.lat, params.lon)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_lookup(StatusCode::BAD_REQUEST, e))
}

/// Anything outside the API and the front-end allow-list.
pub async fn deny(uri: Uri) -> ApiError {
    if uri.path().starts_with("/api/") {
        ApiError::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
    } else {
        tracing::debug!("Denied request for {}", uri.path());
        ApiError::new(StatusCode::FORBIDDEN, "Access denied")
    }
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/city/:city", get(weather_by_city))
        .route("/coordinates", get(weather_by_coordinates))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    let static_dir = PathBuf::from(&state.config.static_dir);
    let index = static_dir.join("index.html");

    let mut router = Router::new()
        .nest("/api/weather", api_router())
        .route_service("/", ServeFile::new(&index))
        .route_service("/index.html", ServeFile::new(&index))
        .nest_service("/static", ServeDir::new(static_dir.join("static")));

    for asset in ["favicon.ico", "manifest.json", "logo192.png", "logo512.png"] {
        router = router.route_service(
            &format!("/{}", asset),
            ServeFile::new(static_dir.join(asset)),
        );
    }

    router.fallback(deny).with_state(state)
}
