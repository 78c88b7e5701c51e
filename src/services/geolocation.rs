use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{filters::validate_provider_fields, GeoError, Matcher};
use crate::models::{
    Coordinates, Location, ProviderLocation, ProviderRegistration, ProviderSearchCriteria,
    ProviderSearchResult, ProviderUpdate, ServiceStats,
};
use crate::services::{Geocoder, ProviderStore};

/// Service radius assigned when a registration omits one, in kilometers
pub const DEFAULT_SERVICE_RADIUS_KM: f64 = 25.0;

/// Entry point used by the HTTP layer
///
/// Wires the provider store, the matcher reading from it, and a geocoder.
#[derive(Clone)]
pub struct GeolocationService {
    store: Arc<dyn ProviderStore>,
    matcher: Matcher,
    geocoder: Arc<dyn Geocoder>,
    default_service_radius_km: f64,
}

impl GeolocationService {
    pub fn new(
        store: Arc<dyn ProviderStore>,
        matcher: Matcher,
        geocoder: Arc<dyn Geocoder>,
        default_service_radius_km: f64,
    ) -> Self {
        Self {
            store,
            matcher,
            geocoder,
            default_service_radius_km,
        }
    }

    /// Ranked providers near `criteria.location`
    pub fn search(&self, criteria: &ProviderSearchCriteria) -> Result<Vec<ProviderSearchResult>, GeoError> {
        self.matcher.find_nearby_providers(criteria)
    }

    /// Store a new provider as active and return the stored record
    pub fn register_provider(&self, registration: ProviderRegistration) -> Result<ProviderLocation, GeoError> {
        validate_provider_fields(
            Some(&registration.location.coordinates),
            registration.service_radius,
            Some(registration.rating),
        )?;

        let service_radius = registration
            .service_radius
            .unwrap_or(self.default_service_radius_km);

        let provider = ProviderLocation {
            provider_id: registration
                .provider_id
                .unwrap_or_else(|| format!("prov_{}", uuid::Uuid::new_v4().simple())),
            provider_type: registration.provider_type,
            business_name: registration.business_name,
            location: registration.location,
            service_radius,
            service_areas: registration.service_areas,
            is_active: true,
            rating: registration.rating,
            total_jobs: registration.total_jobs,
            specialties: registration.specialties,
        };

        self.store.register(provider.clone())?;

        tracing::info!(
            provider_id = %provider.provider_id,
            city = %provider.location.city,
            service_radius = provider.service_radius,
            "Registered provider location"
        );

        Ok(provider)
    }

    /// Merge partial fields into an existing provider
    ///
    /// Invalid fields reject the whole update and leave the stored record as it was.
    pub fn update_provider(&self, provider_id: &str, update: ProviderUpdate) -> Result<ProviderLocation, GeoError> {
        validate_provider_fields(
            update.location.as_ref().map(|location| &location.coordinates),
            update.service_radius,
            update.rating,
        )?;

        let provider = self.store.update(provider_id, update).map_err(|e| {
            tracing::warn!("Failed to update provider {}: {}", provider_id, e);
            GeoError::from(e)
        })?;

        tracing::info!(provider_id = %provider_id, "Updated provider location");
        Ok(provider)
    }

    /// Active providers within `radius_km` of `center`, unranked
    pub fn providers_in_radius(&self, center: &Coordinates, radius_km: f64) -> Result<Vec<ProviderLocation>, GeoError> {
        if !center.is_valid() || !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(GeoError::InvalidCriteria(format!(
                "invalid radius query: ({}, {}) within {} km",
                center.latitude, center.longitude, radius_km
            )));
        }

        Ok(self.store.query_within_radius(center, radius_km)?)
    }

    pub fn geocode_address(&self, address: &str) -> Result<Location, GeoError> {
        tracing::info!(address = %address, "Geocoding address");
        self.geocoder.geocode(address).map_err(|e| {
            tracing::error!("Geocoding failed for {:?}: {}", address, e);
            GeoError::from(e)
        })
    }

    pub fn reverse_geocode(&self, coordinates: &Coordinates) -> Result<Location, GeoError> {
        tracing::info!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "Reverse geocoding"
        );
        self.geocoder.reverse_geocode(coordinates).map_err(|e| {
            tracing::error!("Reverse geocoding failed: {}", e);
            GeoError::from(e)
        })
    }

    /// Totals, average radius of active providers and their coverage areas
    pub fn service_stats(&self) -> Result<ServiceStats, GeoError> {
        let mut providers = self.store.query_all()?;
        providers.sort_by(|a, b| a.provider_id.cmp(&b.provider_id));

        let total_providers = providers.len();
        let active: Vec<&ProviderLocation> = providers.iter().filter(|p| p.is_active).collect();

        let average_service_radius = if active.is_empty() {
            0.0
        } else {
            (active.iter().map(|p| p.service_radius).sum::<f64>() / active.len() as f64).round()
        };

        let mut seen = HashSet::new();
        let coverage_areas = active
            .iter()
            .flat_map(|p| p.service_areas.iter())
            .filter(|area| seen.insert(area.as_str()))
            .cloned()
            .collect();

        Ok(ServiceStats {
            total_providers,
            active_providers: active.len(),
            average_service_radius,
            coverage_areas,
        })
    }
}
