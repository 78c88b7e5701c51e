use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::{Validate, ValidationError};
use crate::models::domain::{
    Coordinates, Location, ProviderRegistration, ProviderSearchCriteria, ProviderType,
};

/// Request to search for nearby providers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchProvidersRequest {
    #[validate(custom(function = "validate_coordinates"))]
    pub location: Coordinates,
    #[serde(rename = "serviceType")]
    pub service_type: ProviderType,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(rename = "maxDistance")]
    pub max_distance: f64,
    #[serde(default)]
    pub specialties: Option<BTreeSet<String>>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[serde(rename = "maxPrice", default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub availability: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<SearchProvidersRequest> for ProviderSearchCriteria {
    fn from(req: SearchProvidersRequest) -> Self {
        Self {
            location: req.location,
            service_type: req.service_type,
            max_distance: req.max_distance,
            specialties: req.specialties,
            min_rating: req.min_rating,
            max_price: req.max_price,
            availability: req.availability,
        }
    }
}

/// Request to register a provider location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterProviderRequest {
    #[serde(rename = "providerId", default)]
    pub provider_id: Option<String>,
    #[serde(rename = "providerType")]
    pub provider_type: ProviderType,
    #[validate(length(min = 1))]
    #[serde(rename = "businessName")]
    pub business_name: String,
    pub location: Location,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(rename = "serviceRadius", default)]
    pub service_radius: Option<f64>,
    #[serde(rename = "serviceAreas", default)]
    pub service_areas: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "totalJobs", default)]
    pub total_jobs: u32,
    #[serde(default)]
    pub specialties: BTreeSet<String>,
}

impl From<RegisterProviderRequest> for ProviderRegistration {
    fn from(req: RegisterProviderRequest) -> Self {
        Self {
            provider_id: req.provider_id,
            provider_type: req.provider_type,
            business_name: req.business_name,
            location: req.location,
            service_radius: req.service_radius,
            service_areas: req.service_areas,
            rating: req.rating,
            total_jobs: req.total_jobs,
            specialties: req.specialties,
        }
    }
}

/// Query string for the radius listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub radius_km: f64,
}

/// Forward geocoding request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeocodeRequest {
    #[validate(length(min = 1))]
    pub address: String,
}

/// Reverse geocoding request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReverseGeocodeRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

fn validate_coordinates(coordinates: &Coordinates) -> Result<(), ValidationError> {
    if coordinates.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::new("coordinates_out_of_range"))
    }
}
