use thiserror::Error;

use crate::services::{GeocodeError, StoreError};

/// Errors surfaced by the matching engine and the geolocation service
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Geo lookup failed: {0}")]
    GeoService(#[from] LookupError),
}

/// Failure of a collaborator the engine reads from
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("provider store: {0}")]
    Store(#[source] StoreError),

    #[error("geocoder: {0}")]
    Geocode(#[from] GeocodeError),
}

impl From<StoreError> for GeoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => GeoError::ProviderNotFound(id),
            other => GeoError::GeoService(LookupError::Store(other)),
        }
    }
}

impl From<GeocodeError> for GeoError {
    fn from(value: GeocodeError) -> Self {
        GeoError::GeoService(LookupError::Geocode(value))
    }
}
