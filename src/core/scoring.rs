use crate::models::{ProviderLocation, ProviderSearchCriteria, ScoringWeights};

/// Calculate a match score (0-100) for a provider against search criteria
///
/// Scoring formula (default weights):
/// score = (
///     distance_score   # up to 40, linear decay to zero at max distance
///   + rating_score     # rating / 5 * 30, or * 25 when a min rating was requested
///   + experience_score # one point per 10 jobs, capped at 20
///   + specialty_score  # overlap share * 10, flat 5 when none requested
/// )
///
/// `distance_km` is the already computed distance to the provider.
pub fn calculate_match_score(
    provider: &ProviderLocation,
    criteria: &ProviderSearchCriteria,
    distance_km: f64,
    weights: &ScoringWeights,
) -> u8 {
    let total = calculate_distance_score(distance_km, criteria.max_distance, weights)
        + calculate_rating_score(provider.rating, criteria.min_rating.is_some(), weights)
        + calculate_experience_score(provider.total_jobs, weights)
        + calculate_specialty_score(provider, criteria, weights);

    total.round().clamp(0.0, 100.0) as u8
}

#[inline]
fn calculate_distance_score(distance_km: f64, max_distance_km: f64, weights: &ScoringWeights) -> f64 {
    (weights.distance - (distance_km / max_distance_km) * weights.distance).max(0.0)
}

#[inline]
fn calculate_rating_score(rating: f64, rating_filtered: bool, weights: &ScoringWeights) -> f64 {
    let weight = if rating_filtered {
        weights.rating_filtered
    } else {
        weights.rating
    };
    ((rating / 5.0) * weight).max(0.0)
}

#[inline]
fn calculate_experience_score(total_jobs: u32, weights: &ScoringWeights) -> f64 {
    (total_jobs as f64 / weights.jobs_per_point).min(weights.experience)
}

fn calculate_specialty_score(
    provider: &ProviderLocation,
    criteria: &ProviderSearchCriteria,
    weights: &ScoringWeights,
) -> f64 {
    match &criteria.specialties {
        Some(requested) if !requested.is_empty() => {
            let shared = provider.specialties.intersection(requested).count();
            (shared as f64 / requested.len() as f64) * weights.specialty
        }
        _ => weights.specialty_baseline,
    }
}
