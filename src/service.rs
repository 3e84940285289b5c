use std::sync::Arc;

use crate::weather::{
    openweather::{OpenWeatherClient, WeatherError},
    types::WeatherRecord,
    LookupKey, WeatherCache,
};

/// Cache-then-provider lookups.
///
/// The cache is consulted and updated around the provider call, never held
/// during it. Concurrent misses for the same key each reach the provider and
/// the last result stored wins.
pub struct WeatherService {
    client: Arc<OpenWeatherClient>,
    cache: WeatherCache,
}

impl WeatherService {
    pub fn new(client: Arc<OpenWeatherClient>, cache: WeatherCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    pub async fn get_by_city(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let key = LookupKey::City(city).cache_key();
        if let Some(record) = self.cache.get(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(record);
        }

        tracing::debug!("Cache miss for {}", key);
        let record = self.client.fetch_by_city(city).await?;
        self.cache.put(key, record.clone()).await;
        Ok(record)
    }

    pub async fn get_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherRecord, WeatherError> {
        let key = LookupKey::Coordinates { lat, lon }.cache_key();
        if let Some(record) = self.cache.get(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(record);
        }

        tracing::debug!("Cache miss for {}", key);
        let record = self.client.fetch_by_coordinates(lat, lon).await?;
        self.cache.put(key, record.clone()).await;
        Ok(record)
    }
}
