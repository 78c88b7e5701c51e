// Core algorithm exports
pub mod distance;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{calculate_distance, estimate_travel_time, haversine_distance};
pub use error::{GeoError, LookupError};
pub use filters::{eligible_distance, validate_criteria, validate_provider_fields};
pub use matcher::{Matcher, MatcherOptions};
pub use scoring::calculate_match_score;
