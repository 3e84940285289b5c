pub mod mock;
pub mod openweather;
pub mod types;

use crate::utils::format_coordinate;
use moka::future::Cache;
use std::fmt;
use std::time::Duration;
use types::WeatherRecord;

/// Identifies one cacheable lookup.
///
/// City names are keyed exactly as requested: demo records echo the
/// requested spelling, so "London" and "LONDON" must not share an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupKey<'a> {
    City(&'a str),
    Coordinates { lat: f64, lon: f64 },
}

impl LookupKey<'_> {
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LookupKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::City(city) => write!(f, "city:{}", city),
            LookupKey::Coordinates { lat, lon } => write!(
                f,
                "coords:{}:{}",
                format_coordinate(*lat),
                format_coordinate(*lon)
            ),
        }
    }
}

/// Process-wide memo of provider results.
#[derive(Clone)]
pub struct WeatherCache {
    inner: Cache<String, WeatherRecord>,
}

impl WeatherCache {
    pub fn new(max_capacity: u64, time_to_live: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_capacity);
        if let Some(ttl) = time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            inner: builder.build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<WeatherRecord> {
        self.inner.get(key).await
    }

    pub async fn put(&self, key: String, record: WeatherRecord) {
        self.inner.insert(key, record).await;
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockWeatherClient;
    use super::*;

    #[test]
    fn test_city_keys_keep_requested_spelling() {
        assert_eq!(LookupKey::City("London").cache_key(), "city:London");
        assert_ne!(
            LookupKey::City("London").cache_key(),
            LookupKey::City("LONDON").cache_key()
        );
        assert_ne!(
            LookupKey::City("London").cache_key(),
            LookupKey::City(" London").cache_key()
        );
    }

    #[test]
    fn test_coordinate_keys_use_fixed_precision() {
        let key = LookupKey::Coordinates { lat: 51.5074, lon: -0.1278 };
        assert_eq!(key.cache_key(), "coords:51.5074:-0.1278");

        let whole = LookupKey::Coordinates { lat: 10.0, lon: -0.0 };
        assert_eq!(whole.cache_key(), "coords:10.0000:0.0000");
    }

    #[test]
    fn test_city_and_coordinate_keys_never_collide() {
        let city = LookupKey::City("coords:1.0000:2.0000").cache_key();
        let coords = LookupKey::Coordinates { lat: 1.0, lon: 2.0 }.cache_key();
        assert_ne!(city, coords);
    }

    #[tokio::test]
    async fn test_put_get_and_clear() {
        let cache = WeatherCache::new(100, None);
        let record = MockWeatherClient::new().current_by_city("Oslo");

        assert!(cache.get("city:oslo").await.is_none());

        cache.put("city:oslo".to_string(), record.clone()).await;
        assert_eq!(cache.get("city:oslo").await, Some(record.clone()));

        let mut replacement = record.clone();
        replacement.main.temperature_c = -4.0;
        cache.put("city:oslo".to_string(), replacement.clone()).await;
        assert_eq!(cache.get("city:oslo").await, Some(replacement));

        cache.clear();
        assert!(cache.get("city:oslo").await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache = WeatherCache::new(100, Some(Duration::from_millis(50)));
        let record = MockWeatherClient::new().current_by_city("Oslo");

        cache.put("city:oslo".to_string(), record).await;
        assert!(cache.get("city:oslo").await.is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get("city:oslo").await.is_none());
    }
}
