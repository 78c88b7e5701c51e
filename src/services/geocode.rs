use thiserror::Error;

use crate::core::distance::calculate_distance;
use crate::models::{Coordinates, Location};

/// Errors that can occur when resolving addresses or coordinates
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Invalid coordinates: ({0}, {1})")]
    InvalidCoordinates(f64, f64),

    #[error("No reference points configured for reverse geocoding")]
    EmptyGazetteer,
}

/// Address ↔ coordinates resolution
pub trait Geocoder: Send + Sync {
    /// Forward geocode: best-effort location for a free-form address
    fn geocode(&self, address: &str) -> Result<Location, GeocodeError>;

    /// Reverse geocode: a known location close to `coordinates`
    fn reverse_geocode(&self, coordinates: &Coordinates) -> Result<Location, GeocodeError>;
}

/// Named place the gazetteer can match by substring
#[derive(Debug, Clone)]
pub struct GazetteerEntry {
    pub name: String,
    pub location: Location,
}

/// Geocoder backed by a fixed lookup table
///
/// Forward lookups match entry names as case-insensitive substrings of the
/// address and fall back to `default_center`. Reverse lookups return the
/// nearest reference point.
#[derive(Debug, Clone)]
pub struct GazetteerGeocoder {
    entries: Vec<GazetteerEntry>,
    reference_points: Vec<Location>,
    default_center: Coordinates,
    default_city: String,
    default_region: String,
    default_country: String,
}

impl GazetteerGeocoder {
    pub fn new(
        entries: Vec<GazetteerEntry>,
        reference_points: Vec<Location>,
        default_center: Coordinates,
        default_city: impl Into<String>,
        default_region: impl Into<String>,
        default_country: impl Into<String>,
    ) -> Self {
        Self {
            entries,
            reference_points,
            default_center,
            default_city: default_city.into(),
            default_region: default_region.into(),
            default_country: default_country.into(),
        }
    }

    /// Gazetteer covering a few Santiago districts
    pub fn santiago() -> Self {
        let place = |lat: f64, lon: f64, address: &str, formatted: &str| Location {
            coordinates: Coordinates::new(lat, lon),
            address: address.to_string(),
            city: "Santiago".to_string(),
            region: "Región Metropolitana".to_string(),
            country: "Chile".to_string(),
            postal_code: None,
            formatted_address: formatted.to_string(),
        };

        let entries = vec![
            GazetteerEntry {
                name: "Santiago Centro".to_string(),
                location: place(
                    -33.4489,
                    -70.6693,
                    "Santiago Centro",
                    "Santiago Centro, Región Metropolitana, Chile",
                ),
            },
            GazetteerEntry {
                name: "Providencia".to_string(),
                location: place(
                    -33.4314,
                    -70.6093,
                    "Providencia",
                    "Providencia, Santiago, Región Metropolitana, Chile",
                ),
            },
            GazetteerEntry {
                name: "Las Condes".to_string(),
                location: place(
                    -33.4155,
                    -70.5831,
                    "Las Condes",
                    "Las Condes, Santiago, Región Metropolitana, Chile",
                ),
            },
        ];

        let reference_points = vec![
            place(
                -33.4489,
                -70.6693,
                "Plaza de Armas",
                "Plaza de Armas, Santiago Centro, Región Metropolitana, Chile",
            ),
            place(
                -33.4314,
                -70.6093,
                "Providencia",
                "Providencia, Santiago, Región Metropolitana, Chile",
            ),
        ];

        Self::new(
            entries,
            reference_points,
            Coordinates::new(-33.4489, -70.6693),
            "Santiago",
            "Región Metropolitana",
            "Chile",
        )
    }

    fn fallback(&self, address: &str) -> Location {
        Location {
            coordinates: self.default_center,
            address: address.to_string(),
            city: self.default_city.clone(),
            region: self.default_region.clone(),
            country: self.default_country.clone(),
            postal_code: None,
            formatted_address: format!(
                "{}, {}, {}, {}",
                address, self.default_city, self.default_region, self.default_country
            ),
        }
    }
}

impl Geocoder for GazetteerGeocoder {
    fn geocode(&self, address: &str) -> Result<Location, GeocodeError> {
        let needle = address.to_lowercase();

        let location = self
            .entries
            .iter()
            .find(|entry| needle.contains(&entry.name.to_lowercase()))
            .map(|entry| entry.location.clone())
            .unwrap_or_else(|| {
                tracing::debug!("No gazetteer match for {:?}, using default center", address);
                self.fallback(address)
            });

        Ok(location)
    }

    fn reverse_geocode(&self, coordinates: &Coordinates) -> Result<Location, GeocodeError> {
        if !coordinates.latitude.is_finite() || !coordinates.longitude.is_finite() {
            return Err(GeocodeError::InvalidCoordinates(
                coordinates.latitude,
                coordinates.longitude,
            ));
        }

        // First point wins on equal distance
        let mut closest: Option<(&Location, f64)> = None;
        for point in &self.reference_points {
            let distance = calculate_distance(coordinates, &point.coordinates);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((point, distance));
            }
        }

        closest
            .map(|(location, _)| location.clone())
            .ok_or(GeocodeError::EmptyGazetteer)
    }
}
