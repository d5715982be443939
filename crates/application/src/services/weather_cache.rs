//! Weather cache
//!
//! In-memory TTL cache for normalized weather data, keyed by location and
//! query kind. Expiry is checked on every read; [`WeatherCache::purge_expired`]
//! reclaims entries that are never read again and is driven by a periodic
//! sweep task.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use domain::entities::DailyWeatherRecord;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

/// Default time-to-live for cached weather (3 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(3 * 60 * 60);

/// Kind of weather query a cache entry answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Current,
    Forecast,
}

/// Cache key: location plus query kind and its parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    location: String,
    kind: CacheKind,
    days: u8,
}

impl CacheKey {
    /// Key for current conditions at a location
    #[must_use]
    pub fn current(location: &str) -> Self {
        Self {
            location: location.to_string(),
            kind: CacheKind::Current,
            days: 0,
        }
    }

    /// Key for a forecast window of `days` days at a location
    #[must_use]
    pub fn forecast(location: &str, days: u8) -> Self {
        Self {
            location: location.to_string(),
            kind: CacheKind::Forecast,
            days,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CacheKind {
        self.kind
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CacheKind::Current => write!(f, "current_{}", self.location),
            CacheKind::Forecast => write!(f, "forecast_{}_{}", self.location, self.days),
        }
    }
}

/// Cached payload
#[derive(Debug, Clone, PartialEq)]
pub enum CachedWeather {
    /// Today's conditions
    Current(DailyWeatherRecord),
    /// Daily records of a forecast window, ascending by date
    Forecast(Vec<DailyWeatherRecord>),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedWeather,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) >= ttl
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Keys of live (unexpired) entries, sorted
    pub keys: Vec<String>,
    /// Stored entries including expired ones not yet swept
    pub entries: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
}

/// TTL cache for weather lookups
pub struct WeatherCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl fmt::Debug for WeatherCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.read().len())
            .finish_non_exhaustive()
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl WeatherCache {
    /// Create a cache whose entries live for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up an entry, evicting it if it has expired
    pub fn get(&self, key: &CacheKey) -> Option<CachedWeather> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now, self.ttl) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key, "Weather cache hit");
                    return Some(entry.value.clone());
                },
                Some(_) => {},
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key, "Weather cache miss");
                    return None;
                },
            }
        }

        // Expired: evict unless a fresh value was written in between
        let mut entries = self.entries.write();
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(now, self.ttl))
        {
            entries.remove(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Weather cache entry expired");
        None
    }

    /// Live entry for a key without touching hit/miss counters or evicting
    pub fn peek(&self, key: &CacheKey) -> Option<CachedWeather> {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Store a value, replacing any previous entry for the key
    pub fn put(&self, key: CacheKey, value: CachedWeather) {
        debug!(key = %key, "Caching weather data");
        self.entries.write().insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Remove all expired entries, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now, self.ttl));
        before - entries.len()
    }

    /// Drop every entry and reset counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Snapshot of cache statistics
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read();
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now, self.ttl))
            .map(|(key, _)| key.to_string())
            .collect();
        keys.sort();

        CacheStats {
            keys,
            entries: entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
