use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    Coordinates, HealthResponse, NearbyQuery, ProviderSearchCriteria, ProviderUpdate,
    RegisterProviderRequest, SearchProvidersRequest, SearchProvidersResponse,
};
use crate::routes::{error_response, validation_error, AppState};

/// Configure all provider-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/providers/search", web::post().to(search_providers))
        .route("/providers/nearby", web::get().to(nearby_providers))
        .route("/providers/stats", web::get().to(service_stats))
        .route("/providers", web::post().to(register_provider))
        .route("/providers/{provider_id}", web::patch().to(update_provider));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, providers) = match state.service.service_stats() {
        Ok(stats) => ("healthy", stats.total_providers),
        Err(e) => {
            tracing::warn!("Health check could not read the provider store: {}", e);
            ("degraded", 0)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers,
        timestamp: chrono::Utc::now(),
    })
}

/// Search providers endpoint
///
/// POST /api/v1/providers/search
///
/// Request body:
/// ```json
/// {
///   "location": { "latitude": -33.4489, "longitude": -70.6693 },
///   "serviceType": "MAINTENANCE",
///   "maxDistance": 30,
///   "specialties": ["plomeria"],
///   "minRating": 4.0
/// }
/// ```
async fn search_providers(
    state: web::Data<AppState>,
    req: web::Json<SearchProvidersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return validation_error(errors);
    }

    let criteria = ProviderSearchCriteria::from(req.into_inner());

    match state.service.search(&criteria) {
        Ok(results) => HttpResponse::Ok().json(SearchProvidersResponse {
            total_results: results.len(),
            results,
        }),
        Err(e) => {
            tracing::error!("Provider search failed: {}", e);
            error_response(&e)
        }
    }
}

/// Unranked providers around a point
///
/// GET /api/v1/providers/nearby?latitude=..&longitude=..&radius_km=..
async fn nearby_providers(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let center = Coordinates::new(query.latitude, query.longitude);
    match state.service.providers_in_radius(&center, query.radius_km) {
        Ok(providers) => HttpResponse::Ok().json(providers),
        Err(e) => error_response(&e),
    }
}

async fn service_stats(state: web::Data<AppState>) -> impl Responder {
    match state.service.service_stats() {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// Register provider endpoint
///
/// POST /api/v1/providers
async fn register_provider(
    state: web::Data<AppState>,
    req: web::Json<RegisterProviderRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.service.register_provider(req.into_inner().into()) {
        Ok(provider) => HttpResponse::Created().json(provider),
        Err(e) => error_response(&e),
    }
}

/// Partial provider update endpoint
///
/// PATCH /api/v1/providers/{provider_id}
async fn update_provider(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ProviderUpdate>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let provider_id = path.into_inner();

    match state.service.update_provider(&provider_id, req.into_inner()) {
        Ok(provider) => HttpResponse::Ok().json(provider),
        Err(e) => error_response(&e),
    }
}
