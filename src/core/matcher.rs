use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::{
    distance::{estimate_travel_time, DEFAULT_AVERAGE_SPEED_KMH},
    filters::{eligible_distance, validate_criteria},
    scoring::calculate_match_score,
    GeoError,
};
use crate::models::{ProviderSearchCriteria, ProviderSearchResult, ScoringWeights};
use crate::services::ProviderStore;

/// Maximum number of results a search returns
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Tunables for the search pipeline
#[derive(Debug, Clone, Copy)]
pub struct MatcherOptions {
    pub weights: ScoringWeights,
    pub max_results: usize,
    pub average_speed_kmh: f64,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            max_results: DEFAULT_MAX_RESULTS,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

/// Scored candidate before output rounding
struct Candidate {
    result: ProviderSearchResult,
    exact_distance: f64,
}

/// Nearby-provider search over an injected store
///
/// # Pipeline Stages
/// 1. Criteria validation
/// 2. Store snapshot
/// 3. Type / activity / radius / rating filtering
/// 4. Scoring, ranking and truncation
#[derive(Clone)]
pub struct Matcher {
    store: Arc<dyn ProviderStore>,
    options: MatcherOptions,
}

impl Matcher {
    pub fn new(store: Arc<dyn ProviderStore>, options: MatcherOptions) -> Self {
        Self { store, options }
    }

    pub fn with_defaults(store: Arc<dyn ProviderStore>) -> Self {
        Self::new(store, MatcherOptions::default())
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Find active providers of the requested type within the search radius
    ///
    /// Results are ordered by match score (descending), then by distance
    /// (ascending), then by provider id, and capped at `max_results`.
    /// An empty list means the search ran and nothing matched.
    pub fn find_nearby_providers(
        &self,
        criteria: &ProviderSearchCriteria,
    ) -> Result<Vec<ProviderSearchResult>, GeoError> {
        validate_criteria(criteria)?;

        tracing::info!(
            latitude = criteria.location.latitude,
            longitude = criteria.location.longitude,
            service_type = ?criteria.service_type,
            max_distance = criteria.max_distance,
            "Searching nearby providers"
        );

        if criteria.max_price.is_some() || criteria.availability.is_some() {
            tracing::debug!("maxPrice/availability are not used for matching and were ignored");
        }

        let providers = self.store.query_all().map_err(|e| {
            tracing::error!("Provider store lookup failed: {}", e);
            GeoError::from(e)
        })?;
        let total_candidates = providers.len();

        let mut candidates: Vec<Candidate> = providers
            .into_iter()
            .filter_map(|provider| {
                let distance = eligible_distance(&provider, criteria)?;
                let estimated_time = estimate_travel_time(distance, self.options.average_speed_kmh);
                let match_score =
                    calculate_match_score(&provider, criteria, distance, &self.options.weights);

                Some(Candidate {
                    result: ProviderSearchResult {
                        provider,
                        distance: round_distance(distance, criteria.max_distance),
                        estimated_time,
                        match_score,
                    },
                    exact_distance: distance,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.result
                .match_score
                .cmp(&a.result.match_score)
                .then_with(|| {
                    a.exact_distance
                        .partial_cmp(&b.exact_distance)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.result.provider.provider_id.cmp(&b.result.provider.provider_id))
        });

        let matched = candidates.len();
        candidates.truncate(self.options.max_results);

        tracing::info!(
            "Found {} nearby providers (returning {}, from {} candidates)",
            matched,
            candidates.len(),
            total_candidates
        );

        Ok(candidates.into_iter().map(|c| c.result).collect())
    }
}

/// Round to one decimal without crossing `max_distance`
#[inline]
fn round_distance(distance_km: f64, max_distance_km: f64) -> f64 {
    let rounded = (distance_km * 10.0).round() / 10.0;
    if rounded > max_distance_km {
        (distance_km * 10.0).floor() / 10.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, Location, ProviderLocation, ProviderType, ProviderUpdate};
    use crate::services::{InMemoryProviderStore, StoreError};
    use std::collections::BTreeSet;

    fn create_provider(id: &str, provider_type: ProviderType, lat: f64, lon: f64, rating: f64) -> ProviderLocation {
        ProviderLocation {
            provider_id: id.to_string(),
            provider_type,
            business_name: format!("Provider {}", id),
            location: Location {
                coordinates: Coordinates::new(lat, lon),
                address: "Test".to_string(),
                city: "Santiago".to_string(),
                region: "Región Metropolitana".to_string(),
                country: "Chile".to_string(),
                postal_code: None,
                formatted_address: "Test, Santiago".to_string(),
            },
            service_radius: 20.0,
            service_areas: vec![],
            is_active: true,
            rating,
            total_jobs: 50,
            specialties: BTreeSet::new(),
        }
    }

    fn criteria(max_distance: f64) -> ProviderSearchCriteria {
        ProviderSearchCriteria::new(
            Coordinates::new(-33.4489, -70.6693),
            ProviderType::Maintenance,
            max_distance,
        )
    }

    struct BrokenStore;

    impl ProviderStore for BrokenStore {
        fn register(&self, _: ProviderLocation) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn update(&self, _: &str, _: ProviderUpdate) -> Result<ProviderLocation, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn get(&self, _: &str) -> Result<Option<ProviderLocation>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        fn query_all(&self) -> Result<Vec<ProviderLocation>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_ties_break_by_distance_then_id() {
        // Identical providers at identical spots tie on score and distance
        let store = InMemoryProviderStore::with_providers(vec![
            create_provider("b", ProviderType::Maintenance, -33.4489, -70.6693, 4.0),
            create_provider("a", ProviderType::Maintenance, -33.4489, -70.6693, 4.0),
            create_provider("c", ProviderType::Maintenance, -33.4489, -70.6692, 4.0),
        ]);
        let matcher = Matcher::with_defaults(Arc::new(store));

        let results = matcher.find_nearby_providers(&criteria(50.0)).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.provider.provider_id.as_str()).collect();

        assert_eq!(results[0].match_score, results[2].match_score);
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_respects_result_cap() {
        let providers: Vec<ProviderLocation> = (0..50)
            .map(|i| {
                create_provider(
                    &format!("prov_{:03}", i),
                    ProviderType::Maintenance,
                    -33.4489 + i as f64 * 0.001,
                    -70.6693,
                    (i % 6) as f64 * 0.8,
                )
            })
            .collect();
        let matcher = Matcher::with_defaults(Arc::new(InMemoryProviderStore::with_providers(providers)));

        let results = matcher.find_nearby_providers(&criteria(30.0)).unwrap();

        assert_eq!(results.len(), DEFAULT_MAX_RESULTS);
        for pair in results.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_invalid_criteria_rejected_before_lookup() {
        let matcher = Matcher::with_defaults(Arc::new(BrokenStore));
        let result = matcher.find_nearby_providers(&criteria(-1.0));
        assert!(matches!(result, Err(GeoError::InvalidCriteria(_))));
    }

    #[test]
    fn test_store_failure_propagates() {
        let matcher = Matcher::with_defaults(Arc::new(BrokenStore));
        let result = matcher.find_nearby_providers(&criteria(10.0));
        assert!(matches!(result, Err(GeoError::GeoService(_))));
    }

    #[test]
    fn test_empty_store_returns_empty_list() {
        let matcher = Matcher::with_defaults(Arc::new(InMemoryProviderStore::new()));
        assert!(matcher.find_nearby_providers(&criteria(10.0)).unwrap().is_empty());
    }

    #[test]
    fn test_round_distance_never_exceeds_max() {
        assert_eq!(round_distance(8.819, 30.0), 8.8);
        assert_eq!(round_distance(29.96, 29.95), 29.9);
        assert_eq!(round_distance(29.94, 29.95), 29.9);
        assert_eq!(round_distance(0.0, 5.0), 0.0);
    }
}
