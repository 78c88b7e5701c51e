// Service exports
pub mod cache;
pub mod geocode;
pub mod geolocation;
pub mod seed;
pub mod store;

pub use cache::{CacheKey, CacheStats, CachedGeocoder};
pub use geocode::{GazetteerEntry, GazetteerGeocoder, GeocodeError, Geocoder};
pub use geolocation::{GeolocationService, DEFAULT_SERVICE_RADIUS_KM};
pub use seed::sample_providers;
pub use store::{InMemoryProviderStore, ProviderStore, StoreError};
