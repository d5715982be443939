//! Weather service
//!
//! Read-through access to normalized weather: resolve the requested date,
//! consult the cache, and on a miss fetch from the provider and normalize.
//! Provider failures are surfaced unchanged and never cached. Concurrent
//! misses on the same key share a single provider fetch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::DailyWeatherRecord;
use domain::DomainError;
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use super::alternative_dates::DailyWeatherSource;
use super::date_resolver::{DateResolution, DateResolver};
use super::forecast_normalizer::{normalize_current, normalize_forecast};
use super::weather_cache::{CacheKey, CacheStats, CachedWeather, WeatherCache};
use crate::error::ApplicationError;
use crate::ports::WeatherProviderPort;

/// Largest forecast window the provider serves, in days
pub const MAX_FORECAST_DAYS: u8 = 5;

/// Weather lookups backed by the provider and the TTL cache
pub struct WeatherService {
    provider: Arc<dyn WeatherProviderPort>,
    cache: Arc<WeatherCache>,
    resolver: DateResolver,
    in_flight: Mutex<HashMap<CacheKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("cache", &self.cache)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a new weather service
    pub fn new(
        provider: Arc<dyn WeatherProviderPort>,
        cache: Arc<WeatherCache>,
        resolver: DateResolver,
    ) -> Self {
        Self {
            provider,
            cache,
            resolver,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Shared cache handle, used by the sweep task
    #[must_use]
    pub const fn cache(&self) -> &Arc<WeatherCache> {
        &self.cache
    }

    #[must_use]
    pub const fn resolver(&self) -> &DateResolver {
        &self.resolver
    }

    /// Weather for a calendar date: current conditions for today, the
    /// matching forecast day for the next five days
    #[instrument(skip(self))]
    pub async fn get_weather_for_date(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<DailyWeatherRecord, ApplicationError> {
        match self.resolver.resolve(date)? {
            DateResolution::CurrentConditions => self.get_current_weather(location).await,
            DateResolution::ForecastLookup { horizon_days } => {
                debug!(horizon_days, "Resolving date from forecast");
                let forecast = self.forecast_window(location, MAX_FORECAST_DAYS).await?;
                forecast
                    .into_iter()
                    .find(|day| day.date == date)
                    .ok_or_else(|| DomainError::NoForecastForDate(date).into())
            },
            DateResolution::Unsupported { horizon_days } => {
                Err(DomainError::UnsupportedDateRange { date, horizon_days }.into())
            },
        }
    }

    /// Current conditions at a location
    #[instrument(skip(self))]
    pub async fn get_current_weather(
        &self,
        location: &str,
    ) -> Result<DailyWeatherRecord, ApplicationError> {
        let today = self.resolver.today();
        let cached = self
            .read_through(CacheKey::current(location), || async move {
                let raw = self.provider.fetch_current(location).await?;
                let record = normalize_current(&raw, today)?;
                info!(location = %location, "Fetched current weather");
                Ok(CachedWeather::Current(record))
            })
            .await?;

        match cached {
            CachedWeather::Current(record) => Ok(record),
            CachedWeather::Forecast(_) => Err(ApplicationError::Internal(
                "forecast cached under a current-weather key".into(),
            )),
        }
    }

    /// Daily forecast for `days` days (1-5)
    #[instrument(skip(self))]
    pub async fn get_forecast(
        &self,
        location: &str,
        days: u8,
    ) -> Result<Vec<DailyWeatherRecord>, ApplicationError> {
        if !(1..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(DomainError::ValidationError(format!(
                "days must be between 1 and {MAX_FORECAST_DAYS} (got {days})"
            ))
            .into());
        }
        self.forecast_window(location, days).await
    }

    async fn forecast_window(
        &self,
        location: &str,
        days: u8,
    ) -> Result<Vec<DailyWeatherRecord>, ApplicationError> {
        let cached = self
            .read_through(CacheKey::forecast(location, days), || async move {
                let raw = self.provider.fetch_forecast_window(location, days).await?;
                let records = normalize_forecast(&raw)?;
                info!(location = %location, days, records = records.len(), "Fetched forecast");
                Ok(CachedWeather::Forecast(records))
            })
            .await?;

        match cached {
            CachedWeather::Forecast(records) => Ok(records),
            CachedWeather::Current(_) => Err(ApplicationError::Internal(
                "current weather cached under a forecast key".into(),
            )),
        }
    }

    /// Serve `key` from the cache, or run `fetch` and cache its success.
    ///
    /// Callers missing the same key wait on one per-key lock, so only the
    /// first runs `fetch`; the rest find the stored value once it lands.
    async fn read_through<F, Fut>(
        &self,
        key: CacheKey,
        fetch: F,
    ) -> Result<CachedWeather, ApplicationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedWeather, ApplicationError>>,
    {
        if let Some(value) = self.cache.get(&key) {
            return Ok(value);
        }

        let gate = Arc::clone(self.in_flight.lock().entry(key.clone()).or_default());
        let result = {
            let _guard = gate.lock().await;
            if let Some(value) = self.cache.peek(&key) {
                debug!(key = %key, "Filled by concurrent fetch");
                Ok(value)
            } else {
                let fetched = fetch().await;
                if let Ok(value) = &fetched {
                    self.cache.put(key.clone(), value.clone());
                }
                fetched
            }
        };

        // Last one out removes the gate
        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(&key)
            .is_some_and(|g| Arc::ptr_eq(g, &gate) && Arc::strong_count(g) == 2)
        {
            in_flight.remove(&key);
        }
        result
    }

    /// Cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[async_trait]
impl DailyWeatherSource for WeatherService {
    async fn weather_for_date(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<DailyWeatherRecord, ApplicationError> {
        self.get_weather_for_date(location, date).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::{Days, TimeZone, Utc};
    use domain::entities::Event;
    use domain::value_objects::{EventType, WeatherCondition};

    use super::*;
    use crate::ports::{ForecastSlot, MockWeatherProviderPort, RawCurrentWeather, RawForecast};
    use crate::services::{AlternativeDateSearch, AlternativeSearchConfig, SuitabilityScorer};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    fn raw_current() -> RawCurrentWeather {
        RawCurrentWeather {
            location: "Zurich".to_string(),
            country: Some("CH".to_string()),
            temperature: 18.0,
            temperature_min: 15.0,
            temperature_max: 20.0,
            humidity: 60,
            wind_speed: 2.0,
            cloudiness: 0,
            rain_1h: None,
            rain_3h: None,
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
        }
    }

    /// Four days of slots starting tomorrow, eight per day
    fn raw_forecast() -> RawForecast {
        let start = Utc.with_ymd_and_hms(2026, 5, 21, 0, 0, 0).unwrap();
        let slots = (0..32)
            .map(|i| ForecastSlot {
                timestamp: start + chrono::Duration::hours(i * 3),
                temperature: 20.0,
                humidity: 50,
                wind_speed: 3.0,
                cloudiness: 30,
                precipitation: 0.0,
                condition: "Clouds".to_string(),
                description: "scattered clouds".to_string(),
            })
            .collect();
        RawForecast {
            location: "Zurich".to_string(),
            country: Some("CH".to_string()),
            utc_offset_secs: 0,
            slots,
        }
    }

    fn service(provider: MockWeatherProviderPort) -> WeatherService {
        WeatherService::new(
            Arc::new(provider),
            Arc::new(WeatherCache::default()),
            DateResolver::pinned(today()),
        )
    }

    #[tokio::test]
    async fn today_uses_current_conditions() {
        let mut provider = MockWeatherProviderPort::new();
        provider
            .expect_fetch_current()
            .times(1)
            .returning(|_| Ok(raw_current()));
        provider.expect_fetch_forecast_window().never();

        let record = service(provider)
            .get_weather_for_date("Zurich", today())
            .await
            .unwrap();
        assert_eq!(record.date, today());
        assert_eq!(record.condition, WeatherCondition::Clear);
    }

    #[tokio::test]
    async fn future_date_picks_forecast_day() {
        let mut provider = MockWeatherProviderPort::new();
        provider
            .expect_fetch_forecast_window()
            .withf(|location, days| location == "Zurich" && *days == 5)
            .times(1)
            .returning(|_, _| Ok(raw_forecast()));

        let service = service(provider);
        let date = today().checked_add_days(Days::new(2)).unwrap();
        let record = service.get_weather_for_date("Zurich", date).await.unwrap();
        assert_eq!(record.date, date);

        // Second lookup served from cache
        let other = today().checked_add_days(Days::new(3)).unwrap();
        let record = service.get_weather_for_date("Zurich", other).await.unwrap();
        assert_eq!(record.date, other);
        assert_eq!(service.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn date_missing_from_window_is_reported() {
        let mut provider = MockWeatherProviderPort::new();
        provider
            .expect_fetch_forecast_window()
            .returning(|_, _| Ok(raw_forecast()));

        let date = today().checked_add_days(Days::new(5)).unwrap();
        let result = service(provider).get_weather_for_date("Zurich", date).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::NoForecastForDate(d))) if d == date
        ));
    }

    #[tokio::test]
    async fn out_of_range_date_never_calls_provider() {
        let mut provider = MockWeatherProviderPort::new();
        provider.expect_fetch_current().never();
        provider.expect_fetch_forecast_window().never();

        let date = today().checked_add_days(Days::new(6)).unwrap();
        let result = service(provider).get_weather_for_date("Zurich", date).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::UnsupportedDateRange { .. }))
        ));
    }

    #[tokio::test]
    async fn current_weather_is_cached() {
        let mut provider = MockWeatherProviderPort::new();
        provider
            .expect_fetch_current()
            .times(1)
            .returning(|_| Ok(raw_current()));

        let service = service(provider);
        service.get_current_weather("Zurich").await.unwrap();
        service.get_current_weather("Zurich").await.unwrap();

        let stats = service.cache_stats();
        assert_eq!(stats.keys, vec!["current_Zurich".to_string()]);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn provider_failures_are_not_cached() {
        let mut provider = MockWeatherProviderPort::new();
        provider
            .expect_fetch_current()
            .times(2)
            .returning(|_| Err(ApplicationError::ProviderUnavailable("down".into())));

        let service = service(provider);
        for _ in 0..2 {
            let result = service.get_current_weather("Zurich").await;
            assert!(matches!(result, Err(ApplicationError::ProviderUnavailable(_))));
        }
        assert!(service.cache_stats().keys.is_empty());
    }

    #[tokio::test]
    async fn provider_errors_propagate_unchanged() {
        let mut provider = MockWeatherProviderPort::new();
        provider
            .expect_fetch_forecast_window()
            .returning(|location, _| Err(ApplicationError::LocationNotFound(location.to_string())));

        let result = service(provider).get_forecast("Atlantis", 3).await;
        assert!(matches!(result, Err(ApplicationError::LocationNotFound(l)) if l == "Atlantis"));
    }

    #[tokio::test]
    async fn forecast_days_are_validated() {
        let mut provider = MockWeatherProviderPort::new();
        provider.expect_fetch_forecast_window().never();
        let service = service(provider);

        for days in [0, 6] {
            let result = service.get_forecast("Zurich", days).await;
            assert!(matches!(
                result,
                Err(ApplicationError::Domain(DomainError::ValidationError(_)))
            ));
        }
    }

    #[tokio::test]
    async fn forecast_cached_per_day_count() {
        let mut provider = MockWeatherProviderPort::new();
        provider
            .expect_fetch_forecast_window()
            .times(2)
            .returning(|_, _| Ok(raw_forecast()));

        let service = service(provider);
        let three = service.get_forecast("Zurich", 3).await.unwrap();
        assert_eq!(three.len(), 4);
        service.get_forecast("Zurich", 3).await.unwrap();
        service.get_forecast("Zurich", 4).await.unwrap();

        assert_eq!(
            service.cache_stats().keys,
            vec!["forecast_Zurich_3".to_string(), "forecast_Zurich_4".to_string()]
        );
    }

    #[tokio::test]
    async fn empty_forecast_is_an_error() {
        let mut provider = MockWeatherProviderPort::new();
        provider.expect_fetch_forecast_window().returning(|_, _| {
            let mut raw = raw_forecast();
            raw.slots.clear();
            Ok(raw)
        });

        let result = service(provider).get_forecast("Zurich", 2).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::EmptyForecastData))
        ));
    }

    /// Slow provider that counts its calls
    #[derive(Default)]
    struct CountingProvider {
        current_calls: AtomicUsize,
        forecast_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl WeatherProviderPort for CountingProvider {
        async fn fetch_current(&self, _location: &str) -> Result<RawCurrentWeather, ApplicationError> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            if self.fail {
                return Err(ApplicationError::ProviderUnavailable("down".into()));
            }
            Ok(raw_current())
        }

        async fn fetch_forecast_window(
            &self,
            _location: &str,
            _days: u8,
        ) -> Result<RawForecast, ApplicationError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(raw_forecast())
        }
    }

    fn counting_service(provider: Arc<CountingProvider>) -> WeatherService {
        WeatherService::new(
            provider,
            Arc::new(WeatherCache::default()),
            DateResolver::pinned(today()),
        )
    }

    #[tokio::test]
    async fn concurrent_alternative_lookups_share_one_fetch() {
        let provider = Arc::new(CountingProvider::default());
        let service = counting_service(Arc::clone(&provider));
        let search =
            AlternativeDateSearch::new(SuitabilityScorer::new(), AlternativeSearchConfig::default());
        let event = Event::new("Open Air", "Zurich", today(), EventType::General);

        let alternatives = search.find_alternatives(&service, &event, 5).await;

        // The fixture covers four days after today; the fifth has no forecast
        assert_eq!(alternatives.len(), 4);
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.cache_stats().keys, vec!["forecast_Zurich_5".to_string()]);
        assert!(service.in_flight.lock().is_empty());
    }

    #[tokio::test]
    async fn concurrent_current_lookups_share_one_fetch() {
        let provider = Arc::new(CountingProvider::default());
        let service = counting_service(Arc::clone(&provider));

        let results = futures::future::join_all(
            (0..6).map(|_| service.get_current_weather("Zurich")),
        )
        .await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_failures_are_retried_not_cached() {
        let provider = Arc::new(CountingProvider {
            fail: true,
            ..Default::default()
        });
        let service = counting_service(Arc::clone(&provider));

        let results = futures::future::join_all(
            (0..3).map(|_| service.get_current_weather("Zurich")),
        )
        .await;

        assert!(results
            .iter()
            .all(|r| matches!(r, Err(ApplicationError::ProviderUnavailable(_)))));
        // Each waiter finds nothing cached and tries the provider itself
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 3);
        assert!(service.cache_stats().keys.is_empty());
        assert!(service.in_flight.lock().is_empty());
    }
}
