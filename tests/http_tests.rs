// HTTP surface tests for geo-match

use actix_web::{http::StatusCode, test, web, App};
use geo_match::config::Settings;
use geo_match::models::{ErrorResponse, ProviderLocation, SearchProvidersResponse, ServiceStats};
use geo_match::routes::{self, AppState};
use serde_json::json;

macro_rules! test_app {
    () => {{
        let state = AppState::from_settings(&Settings::default());
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(routes::configure_extractors)
                .configure(routes::configure_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_health() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["providers"], 3);
}

#[actix_web::test]
async fn test_search_returns_ranked_maintenance_providers() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/providers/search")
        .set_json(json!({
            "location": { "latitude": -33.4489, "longitude": -70.6693 },
            "serviceType": "MAINTENANCE",
            "maxDistance": 30
        }))
        .to_request();

    let body: SearchProvidersResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.total_results, 2);
    assert_eq!(body.results[0].provider.provider_id, "prov_001");
    assert_eq!(body.results[0].match_score, 87);
    assert_eq!(body.results[1].provider.provider_id, "prov_003");
    assert_eq!(body.results[1].match_score, 68);
}

#[actix_web::test]
async fn test_search_rejects_non_positive_distance() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/providers/search")
        .set_json(json!({
            "location": { "latitude": -33.4489, "longitude": -70.6693 },
            "serviceType": "SERVICE",
            "maxDistance": 0
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_search_accepts_wide_radius() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/providers/search")
        .set_json(json!({
            "location": { "latitude": -33.4489, "longitude": -70.6693 },
            "serviceType": "MAINTENANCE",
            "maxDistance": 500
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: SearchProvidersResponse = test::read_body_json(resp).await;
    let ids: Vec<&str> = body.results.iter().map(|r| r.provider.provider_id.as_str()).collect();
    assert_eq!(ids, vec!["prov_001", "prov_003"]);
    assert!(body.results.iter().all(|r| r.distance <= 500.0));
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/providers/search")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_json");
}

#[actix_web::test]
async fn test_register_then_update_provider() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/providers")
        .set_json(json!({
            "providerId": "prov_100",
            "providerType": "SERVICE",
            "businessName": "Fumigaciones Andes",
            "location": {
                "coordinates": { "latitude": -33.4155, "longitude": -70.5831 },
                "address": "Las Condes 10",
                "city": "Santiago",
                "region": "Región Metropolitana",
                "country": "Chile",
                "formattedAddress": "Las Condes 10, Las Condes"
            },
            "rating": 4.1,
            "totalJobs": 12,
            "specialties": ["fumigacion"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: ProviderLocation = test::read_body_json(resp).await;
    assert!(created.is_active);
    assert_eq!(created.service_radius, 25.0);

    let req = test::TestRequest::patch()
        .uri("/api/v1/providers/prov_100")
        .set_json(json!({ "rating": 4.6, "serviceAreas": ["Las Condes"] }))
        .to_request();
    let updated: ProviderLocation = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.rating, 4.6);
    assert_eq!(updated.service_areas, vec!["Las Condes"]);
    assert_eq!(updated.business_name, "Fumigaciones Andes");
}

#[actix_web::test]
async fn test_update_rejects_invalid_fields() {
    let app = test_app!();

    let req = test::TestRequest::patch()
        .uri("/api/v1/providers/prov_001")
        .set_json(json!({ "rating": 42, "serviceRadius": -5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "validation_failed");

    // Out-of-range coordinates are caught by the service
    let req = test::TestRequest::patch()
        .uri("/api/v1/providers/prov_001")
        .set_json(json!({
            "location": {
                "coordinates": { "latitude": 500.0, "longitude": 999.0 },
                "address": "Nowhere",
                "city": "Santiago",
                "region": "Región Metropolitana",
                "country": "Chile",
                "formattedAddress": "Nowhere"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_criteria");

    let req = test::TestRequest::post()
        .uri("/api/v1/providers/search")
        .set_json(json!({
            "location": { "latitude": -33.4489, "longitude": -70.6693 },
            "serviceType": "MAINTENANCE",
            "maxDistance": 30
        }))
        .to_request();
    let body: SearchProvidersResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.results[0].provider.provider_id, "prov_001");
    assert_eq!(body.results[0].provider.rating, 4.5);
    assert_eq!(body.results[0].provider.service_radius, 20.0);
}

#[actix_web::test]
async fn test_update_unknown_provider_is_not_found() {
    let app = test_app!();
    let req = test::TestRequest::patch()
        .uri("/api/v1/providers/prov_404")
        .set_json(json!({ "isActive": false }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_nearby_and_stats() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/providers/nearby?latitude=-33.4489&longitude=-70.6693&radius_km=7")
        .to_request();
    let nearby: Vec<ProviderLocation> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(nearby.len(), 2);

    let req = test::TestRequest::get().uri("/api/v1/providers/stats").to_request();
    let stats: ServiceStats = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats.total_providers, 3);
    assert_eq!(stats.average_service_radius, 20.0);
}

#[actix_web::test]
async fn test_geocode_round_trip() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/geocode")
        .set_json(json!({ "address": "Apoquindo 4500, Las Condes" }))
        .to_request();
    let location: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(location["address"], "Las Condes");

    let req = test::TestRequest::post()
        .uri("/api/v1/geocode/reverse")
        .set_json(json!({ "latitude": -33.449, "longitude": -70.669 }))
        .to_request();
    let location: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(location["address"], "Plaza de Armas");
}
