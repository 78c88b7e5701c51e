use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{Coordinates, GeocodeRequest, ReverseGeocodeRequest};
use crate::routes::{error_response, validation_error, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/geocode", web::post().to(geocode))
        .route("/geocode/reverse", web::post().to(reverse_geocode));
}

/// POST /api/v1/geocode `{ "address": "..." }`
async fn geocode(
    state: web::Data<AppState>,
    req: web::Json<GeocodeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state.service.geocode_address(&req.address) {
        Ok(location) => HttpResponse::Ok().json(location),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/geocode/reverse `{ "latitude": .., "longitude": .. }`
async fn reverse_geocode(
    state: web::Data<AppState>,
    req: web::Json<ReverseGeocodeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let coordinates = Coordinates::new(req.latitude, req.longitude);
    match state.service.reverse_geocode(&coordinates) {
        Ok(location) => HttpResponse::Ok().json(location),
        Err(e) => error_response(&e),
    }
}
