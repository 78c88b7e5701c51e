//! geo-match - provider geolocation matching for the rental platform
//!
//! Finds maintenance and service providers near a location and ranks them
//! by a composite score of distance, rating, experience and specialty
//! overlap. Storage and geocoding are injected so the engine can run
//! against any backing store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{GeoError, Matcher, MatcherOptions, calculate_distance, calculate_match_score, estimate_travel_time};
pub use models::{Coordinates, Location, ProviderLocation, ProviderSearchCriteria, ProviderSearchResult, ProviderType};
pub use services::{GeolocationService, Geocoder, InMemoryProviderStore, ProviderStore};
