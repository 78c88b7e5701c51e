use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside the valid lat/lon ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(value: Coordinates) -> Self {
        // geo points are (x = longitude, y = latitude)
        geo::Point::new(value.longitude, value.latitude)
    }
}

/// A resolved physical place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coordinates: Coordinates,
    pub address: String,
    pub city: String,
    pub region: String,
    pub country: String,
    #[serde(rename = "postalCode", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: String,
}

/// Kind of work a provider takes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProviderType {
    Maintenance,
    Service,
}

/// Provider record held by the location store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderLocation {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "providerType")]
    pub provider_type: ProviderType,
    #[serde(rename = "businessName")]
    pub business_name: String,
    pub location: Location,
    /// Kilometres the provider is willing to travel
    #[serde(rename = "serviceRadius")]
    pub service_radius: f64,
    #[serde(rename = "serviceAreas", default)]
    pub service_areas: Vec<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    pub rating: f64,
    #[serde(rename = "totalJobs", default)]
    pub total_jobs: u32,
    #[serde(default)]
    pub specialties: BTreeSet<String>,
}

impl ProviderLocation {
    pub fn coordinates(&self) -> &Coordinates {
        &self.location.coordinates
    }

    /// Apply the fields present in `update`, leaving the rest untouched
    pub fn apply(&mut self, update: ProviderUpdate) {
        if let Some(provider_type) = update.provider_type {
            self.provider_type = provider_type;
        }
        if let Some(business_name) = update.business_name {
            self.business_name = business_name;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(service_radius) = update.service_radius {
            self.service_radius = service_radius;
        }
        if let Some(service_areas) = update.service_areas {
            self.service_areas = service_areas;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(total_jobs) = update.total_jobs {
            self.total_jobs = total_jobs;
        }
        if let Some(specialties) = update.specialties {
            self.specialties = specialties;
        }
    }
}

fn default_true() -> bool { true }

/// Partial provider fields for an update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProviderUpdate {
    #[serde(rename = "providerType", default)]
    pub provider_type: Option<ProviderType>,
    #[serde(rename = "businessName", default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(rename = "serviceRadius", default)]
    pub service_radius: Option<f64>,
    #[serde(rename = "serviceAreas", default)]
    pub service_areas: Option<Vec<String>>,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "totalJobs", default)]
    pub total_jobs: Option<u32>,
    #[serde(default)]
    pub specialties: Option<BTreeSet<String>>,
}

/// New provider data; registration always stores the provider as active
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRegistration {
    pub provider_id: Option<String>,
    pub provider_type: ProviderType,
    pub business_name: String,
    pub location: Location,
    pub service_radius: Option<f64>,
    pub service_areas: Vec<String>,
    pub rating: f64,
    pub total_jobs: u32,
    pub specialties: BTreeSet<String>,
}

/// Search input for one nearby-provider lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSearchCriteria {
    pub location: Coordinates,
    #[serde(rename = "serviceType")]
    pub service_type: ProviderType,
    /// Search radius in kilometres
    #[serde(rename = "maxDistance")]
    pub max_distance: f64,
    #[serde(default)]
    pub specialties: Option<BTreeSet<String>>,
    #[serde(rename = "minRating", default)]
    pub min_rating: Option<f64>,
    /// Accepted but not used for filtering or scoring
    #[serde(rename = "maxPrice", default)]
    pub max_price: Option<f64>,
    /// Accepted but not used for filtering or scoring
    #[serde(default)]
    pub availability: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProviderSearchCriteria {
    pub fn new(location: Coordinates, service_type: ProviderType, max_distance: f64) -> Self {
        Self {
            location,
            service_type,
            max_distance,
            specialties: None,
            min_rating: None,
            max_price: None,
            availability: None,
        }
    }
}

/// Ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSearchResult {
    pub provider: ProviderLocation,
    /// Kilometres, one decimal
    pub distance: f64,
    /// Minutes
    #[serde(rename = "estimatedTime")]
    pub estimated_time: u32,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Aggregate view over the provider store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    #[serde(rename = "totalProviders")]
    pub total_providers: usize,
    #[serde(rename = "activeProviders")]
    pub active_providers: usize,
    #[serde(rename = "averageServiceRadius")]
    pub average_service_radius: f64,
    #[serde(rename = "coverageAreas")]
    pub coverage_areas: Vec<String>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Scoring weights (points, not fractions)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub distance: f64,
    /// Rating weight when no minimum rating was requested
    pub rating: f64,
    /// Rating weight when the search already filtered on a minimum rating
    pub rating_filtered: f64,
    /// Cap on the experience component
    pub experience: f64,
    /// Completed jobs needed for one experience point
    pub jobs_per_point: f64,
    pub specialty: f64,
    /// Specialty points granted when the search names no specialties
    pub specialty_baseline: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 40.0,
            rating: 30.0,
            rating_filtered: 25.0,
            experience: 20.0,
            jobs_per_point: 10.0,
            specialty: 10.0,
            specialty_baseline: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_wire_names() {
        let json = serde_json::to_string(&ProviderType::Maintenance).unwrap();
        assert_eq!(json, "\"MAINTENANCE\"");
        let parsed: ProviderType = serde_json::from_str("\"SERVICE\"").unwrap();
        assert_eq!(parsed, ProviderType::Service);
    }

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(-33.4489, -70.6693).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_provider_update_validation() {
        let update: ProviderUpdate = serde_json::from_str(r#"{"rating":4.5,"serviceRadius":12}"#).unwrap();
        assert!(update.validate().is_ok());
        assert!(ProviderUpdate::default().validate().is_ok());

        let update: ProviderUpdate = serde_json::from_str(r#"{"rating":42}"#).unwrap();
        assert!(update.validate().is_err());

        let update: ProviderUpdate = serde_json::from_str(r#"{"serviceRadius":-5}"#).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_criteria_inert_fields_default_to_none() {
        let criteria: ProviderSearchCriteria = serde_json::from_str(
            r#"{"location":{"latitude":-33.4,"longitude":-70.6},"serviceType":"MAINTENANCE","maxDistance":10}"#,
        )
        .unwrap();

        assert_eq!(criteria.max_distance, 10.0);
        assert!(criteria.max_price.is_none());
        assert!(criteria.availability.is_none());
        assert!(criteria.specialties.is_none());
    }
}
