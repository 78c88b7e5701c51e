use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::models::{Coordinates, Location};
use crate::services::geocode::{GeocodeError, Geocoder};

/// Geocoder decorator that memoizes resolved locations
///
/// Only successful lookups are cached; errors always reach the caller.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Cache<String, Location>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Wrap `inner` with a cache of at most `max_entries` locations kept for `ttl_secs`
    pub fn new(inner: G, max_entries: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn cached<F>(&self, key: String, resolve: F) -> Result<Location, GeocodeError>
    where
        F: FnOnce() -> Result<Location, GeocodeError>,
    {
        if let Some(location) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Geocode cache hit: {}", key);
            return Ok(location);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("Geocode cache miss: {}", key);

        let location = resolve()?;
        self.cache.insert(key, location.clone());
        Ok(location)
    }

    /// Drop every cached entry
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Invalidated geocode cache");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();

        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            size: self.cache.entry_count(),
            hit_count: hits,
            miss_count: misses,
            hit_rate: if lookups > 0 { hits as f64 / lookups as f64 } else { 0.0 },
        }
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn geocode(&self, address: &str) -> Result<Location, GeocodeError> {
        self.cached(CacheKey::geocode(address), || self.inner.geocode(address))
    }

    fn reverse_geocode(&self, coordinates: &Coordinates) -> Result<Location, GeocodeError> {
        if !coordinates.latitude.is_finite() || !coordinates.longitude.is_finite() {
            return self.inner.reverse_geocode(coordinates);
        }
        self.cached(CacheKey::reverse(coordinates), || {
            self.inner.reverse_geocode(coordinates)
        })
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a forward lookup
    pub fn geocode(address: &str) -> String {
        format!("geocode:{}", address.trim().to_lowercase())
    }

    /// Build a cache key for a reverse lookup
    ///
    /// Keys on the exact coordinates so a hit always returns the point the
    /// inner geocoder picked for that same input.
    pub fn reverse(coordinates: &Coordinates) -> String {
        format!("reverse:{},{}", coordinates.latitude, coordinates.longitude)
    }
}
