use crate::core::{distance::calculate_distance, GeoError};
use crate::models::{Coordinates, ProviderLocation, ProviderSearchCriteria};

/// Check search criteria before touching the store
///
/// Rejects a non-positive or non-finite radius, malformed coordinates and
/// ratings outside [0, 5]. Any positive radius is accepted.
pub fn validate_criteria(criteria: &ProviderSearchCriteria) -> Result<(), GeoError> {
    if !criteria.max_distance.is_finite() || criteria.max_distance <= 0.0 {
        return Err(GeoError::InvalidCriteria(format!(
            "maxDistance must be a positive number of kilometers, got {}",
            criteria.max_distance
        )));
    }

    if !criteria.location.is_valid() {
        return Err(GeoError::InvalidCriteria(format!(
            "location ({}, {}) is not a valid latitude/longitude pair",
            criteria.location.latitude, criteria.location.longitude
        )));
    }

    if let Some(min_rating) = criteria.min_rating {
        if !(0.0..=5.0).contains(&min_rating) {
            return Err(GeoError::InvalidCriteria(format!(
                "minRating must be between 0 and 5, got {}",
                min_rating
            )));
        }
    }

    Ok(())
}

/// Check provider fields before they reach the store
///
/// Shared by registration and partial updates; `None` skips a field.
/// Coordinates must be a valid pair, the service radius positive and finite,
/// and the rating within [0, 5].
pub fn validate_provider_fields(
    coordinates: Option<&Coordinates>,
    service_radius: Option<f64>,
    rating: Option<f64>,
) -> Result<(), GeoError> {
    if let Some(coordinates) = coordinates {
        if !coordinates.is_valid() {
            return Err(GeoError::InvalidCriteria(format!(
                "provider location ({}, {}) is not a valid latitude/longitude pair",
                coordinates.latitude, coordinates.longitude
            )));
        }
    }

    if let Some(radius) = service_radius {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeoError::InvalidCriteria(format!(
                "serviceRadius must be positive, got {}",
                radius
            )));
        }
    }

    if let Some(rating) = rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(GeoError::InvalidCriteria(format!(
                "rating must be between 0 and 5, got {}",
                rating
            )));
        }
    }

    Ok(())
}

/// Run the eligibility checks for one provider
///
/// Checks run in order and stop at the first failure: service type,
/// active flag, distance, minimum rating. Returns the exact distance in
/// kilometers for providers that pass.
#[inline]
pub fn eligible_distance(
    provider: &ProviderLocation,
    criteria: &ProviderSearchCriteria,
) -> Option<f64> {
    if provider.provider_type != criteria.service_type {
        return None;
    }

    if !provider.is_active {
        return None;
    }

    let distance = calculate_distance(&criteria.location, provider.coordinates());
    if distance > criteria.max_distance {
        return None;
    }

    if !meets_min_rating(provider, criteria) {
        return None;
    }

    Some(distance)
}

#[inline]
pub fn meets_min_rating(provider: &ProviderLocation, criteria: &ProviderSearchCriteria) -> bool {
    criteria
        .min_rating
        .map_or(true, |min_rating| provider.rating >= min_rating)
}
