use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// API key value that means "no provider credential configured".
pub const DEMO_API_KEY: &str = "demo_key";

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub weather_api_key: String,
    pub weather_api_url: String,
    pub bind_addr: String,
    pub static_dir: String,
    pub http_timeout_secs: u64,
    pub cache_max_entries: u64,
    pub cache_ttl_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            weather_api_key: DEMO_API_KEY.to_string(),
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            static_dir: "./frontend/build".to_string(),
            http_timeout_secs: 5,
            cache_max_entries: 1000,
            cache_ttl_secs: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            weather_api_key: env::var("WEATHER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .unwrap_or(defaults.weather_api_key),
            weather_api_url: env::var("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            // a zero timeout would fail every outbound call
            http_timeout_secs: parse_var("WEATHER_HTTP_TIMEOUT_SECS")?
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.http_timeout_secs),
            cache_max_entries: parse_var("WEATHER_CACHE_MAX_ENTRIES")?
                .unwrap_or(defaults.cache_max_entries),
            // 0 behaves like unset: entries never expire
            cache_ttl_secs: parse_var("WEATHER_CACHE_TTL_SECS")?.filter(|secs| *secs > 0),
        })
    }

    pub fn is_demo(&self) -> bool {
        self.weather_api_key == DEMO_API_KEY
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(None),
    }
}
