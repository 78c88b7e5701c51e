// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Coordinates, Location, ProviderLocation, ProviderRegistration,
    ProviderSearchCriteria, ProviderSearchResult, ProviderType, ProviderUpdate, ScoringWeights,
    ServiceStats,
};
pub use requests::{
    GeocodeRequest, NearbyQuery, RegisterProviderRequest, ReverseGeocodeRequest,
    SearchProvidersRequest,
};
pub use responses::{ErrorResponse, HealthResponse, SearchProvidersResponse};
