use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;
mod service;
mod utils;
mod weather;

use config::Config;
use routes::{create_router, AppState};
use service::WeatherService;
use weather::{openweather::OpenWeatherClient, WeatherCache};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.is_demo() {
        tracing::warn!("No weather API key configured, serving synthetic demo data");
    } else {
        tracing::info!("Using weather provider at {}", config.weather_api_url);
    }

    let weather_client = Arc::new(OpenWeatherClient::new(config.clone())?);
    let cache = WeatherCache::new(config.cache_max_entries, config.cache_ttl());
    let weather = Arc::new(WeatherService::new(weather_client, cache));

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        config: Arc::new(config),
        weather,
    };

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server starting on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
