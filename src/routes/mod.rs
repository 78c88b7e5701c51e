// Route exports
pub mod geocode;
pub mod providers;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use crate::config::Settings;
use crate::core::{GeoError, Matcher, MatcherOptions};
use crate::models::{ErrorResponse, ScoringWeights};
use crate::services::{
    sample_providers, CachedGeocoder, GazetteerGeocoder, GeolocationService, InMemoryProviderStore,
    ProviderStore,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: GeolocationService,
}

impl AppState {
    /// Wire store, matcher and geocoder from configuration
    pub fn from_settings(settings: &Settings) -> Self {
        let store = if settings.store.seed_sample_providers {
            InMemoryProviderStore::with_providers(sample_providers())
        } else {
            InMemoryProviderStore::new()
        };
        match store.len() {
            Ok(count) => tracing::info!("Provider store initialized with {} providers", count),
            Err(e) => tracing::warn!("Provider store initialized but unreadable: {}", e),
        }
        let store: Arc<dyn ProviderStore> = Arc::new(store);

        let options = MatcherOptions {
            weights: ScoringWeights::from(&settings.scoring.weights),
            max_results: settings.matching.max_results,
            average_speed_kmh: settings.matching.average_speed_kmh,
        };
        tracing::info!("Matcher initialized with weights: {:?}", options.weights);

        let geocoder = CachedGeocoder::new(
            GazetteerGeocoder::santiago(),
            settings.cache.geocode_cache_size,
            settings.cache.ttl_secs,
        );

        let service = GeolocationService::new(
            Arc::clone(&store),
            Matcher::new(store, options),
            Arc::new(geocoder),
            settings.matching.default_service_radius_km,
        );

        Self { service }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(providers::configure)
            .configure(geocode::configure),
    );
}

/// JSON and query extractor settings that answer with an `ErrorResponse`
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error));
}

/// Map a service error onto an HTTP response
pub(crate) fn error_response(err: &GeoError) -> HttpResponse {
    let (status, error) = match err {
        GeoError::InvalidCriteria(_) => (StatusCode::BAD_REQUEST, "invalid_criteria"),
        GeoError::ProviderNotFound(_) => (StatusCode::NOT_FOUND, "provider_not_found"),
        GeoError::GeoService(_) => (StatusCode::SERVICE_UNAVAILABLE, "lookup_failed"),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn payload_error(error: &str, message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message: message.clone(),
        status_code: 400,
    });
    error::InternalError::from_response(message, response).into()
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    payload_error("invalid_json", format!("Invalid JSON: {}", err))
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    payload_error("invalid_query", format!("Invalid query: {}", err))
}
