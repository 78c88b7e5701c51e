// Unit tests for geo-match

use geo_match::core::{
    distance::{calculate_distance, estimate_travel_time, haversine_distance},
    filters::eligible_distance,
    scoring::calculate_match_score,
};
use geo_match::models::{
    Coordinates, Location, ProviderLocation, ProviderSearchCriteria, ProviderType, ScoringWeights,
};
use std::collections::BTreeSet;

const SANTIAGO_CENTRO: Coordinates = Coordinates::new(-33.4489, -70.6693);
const PROVIDENCIA: Coordinates = Coordinates::new(-33.4314, -70.6093);

fn create_test_provider(rating: f64, total_jobs: u32) -> ProviderLocation {
    ProviderLocation {
        provider_id: "prov_test".to_string(),
        provider_type: ProviderType::Maintenance,
        business_name: "Test".to_string(),
        location: Location {
            coordinates: PROVIDENCIA,
            address: "Providencia 1".to_string(),
            city: "Santiago".to_string(),
            region: "Región Metropolitana".to_string(),
            country: "Chile".to_string(),
            postal_code: Some("7500000".to_string()),
            formatted_address: "Providencia 1, Providencia".to_string(),
        },
        service_radius: 15.0,
        service_areas: vec!["Providencia".to_string()],
        is_active: true,
        rating,
        total_jobs,
        specialties: BTreeSet::from(["plomeria".to_string(), "gas".to_string()]),
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(-33.4489, -70.6693, -33.4489, -70.6693);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_distance_symmetry() {
    let points = [
        SANTIAGO_CENTRO,
        PROVIDENCIA,
        Coordinates::new(51.5074, -0.1278),
        Coordinates::new(-90.0, 180.0),
        Coordinates::new(0.0, 0.0),
    ];

    for a in &points {
        for b in &points {
            let there = calculate_distance(a, b);
            let back = calculate_distance(b, a);
            assert!((there - back).abs() < 1e-9, "{:?} <-> {:?}", a, b);
        }
    }
}

#[test]
fn test_haversine_distance_london_to_paris() {
    let distance = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
    assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
}

#[test]
fn test_travel_time_includes_preparation() {
    assert_eq!(estimate_travel_time(0.0, 30.0), 15);
    assert_eq!(estimate_travel_time(30.0, 30.0), 75);
    assert_eq!(estimate_travel_time(10.0, 60.0), 25);
}

#[test]
fn test_match_score_within_valid_range() {
    let weights = ScoringWeights::default();
    let mut criteria = ProviderSearchCriteria::new(SANTIAGO_CENTRO, ProviderType::Maintenance, 12.0);

    for rating in [0.0, 2.5, 5.0] {
        for jobs in [0, 75, 10_000] {
            for distance in [0.0, 6.0, 12.0] {
                for min_rating in [None, Some(3.0)] {
                    criteria.min_rating = min_rating;
                    let provider = create_test_provider(rating, jobs);
                    let score = calculate_match_score(&provider, &criteria, distance, &weights);
                    assert!(score <= 100, "Score {} is out of range", score);
                }
            }
        }
    }
}

#[test]
fn test_specialty_match_scores_higher() {
    let weights = ScoringWeights::default();
    let provider = create_test_provider(4.0, 40);

    let mut matching = ProviderSearchCriteria::new(SANTIAGO_CENTRO, ProviderType::Maintenance, 20.0);
    matching.specialties = Some(BTreeSet::from(["plomeria".to_string()]));

    let mut unrelated = matching.clone();
    unrelated.specialties = Some(BTreeSet::from(["fumigacion".to_string()]));

    let matching_score = calculate_match_score(&provider, &matching, 5.9, &weights);
    let unrelated_score = calculate_match_score(&provider, &unrelated, 5.9, &weights);

    assert_eq!(matching_score - unrelated_score, 10);
}

#[test]
fn test_eligibility_uses_exact_distance() {
    let provider = create_test_provider(4.0, 40);

    let inside = ProviderSearchCriteria::new(SANTIAGO_CENTRO, ProviderType::Maintenance, 5.9);
    let outside = ProviderSearchCriteria::new(SANTIAGO_CENTRO, ProviderType::Maintenance, 5.89);

    assert!(eligible_distance(&provider, &inside).is_some());
    assert!(eligible_distance(&provider, &outside).is_none());
}
