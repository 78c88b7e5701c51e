use crate::models::{Coordinates, Location, ProviderLocation, ProviderType};

const REGION: &str = "Región Metropolitana";
const COUNTRY: &str = "Chile";

fn santiago_location(lat: f64, lon: f64, address: &str, district: &str) -> Location {
    Location {
        coordinates: Coordinates::new(lat, lon),
        address: address.to_string(),
        city: "Santiago".to_string(),
        region: REGION.to_string(),
        country: COUNTRY.to_string(),
        postal_code: None,
        formatted_address: format!("{}, {}, {}, {}", address, district, REGION, COUNTRY),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Development providers around Santiago
pub fn sample_providers() -> Vec<ProviderLocation> {
    vec![
        ProviderLocation {
            provider_id: "prov_001".to_string(),
            provider_type: ProviderType::Maintenance,
            business_name: "Mantenimiento Express".to_string(),
            location: santiago_location(
                -33.4489,
                -70.6693,
                "Av. Libertador Bernardo O'Higgins 123",
                "Santiago Centro",
            ),
            service_radius: 20.0,
            service_areas: strings(&["Santiago Centro", "Estación Central", "Independencia"]),
            is_active: true,
            rating: 4.5,
            total_jobs: 150,
            specialties: strings(&["plomeria", "electricidad", "carpinteria"]).into_iter().collect(),
        },
        ProviderLocation {
            provider_id: "prov_002".to_string(),
            provider_type: ProviderType::Service,
            business_name: "Limpieza Profesional Plus".to_string(),
            location: santiago_location(-33.4314, -70.6093, "Providencia 456", "Providencia"),
            service_radius: 15.0,
            service_areas: strings(&["Providencia", "Las Condes", "Vitacura"]),
            is_active: true,
            rating: 4.8,
            total_jobs: 200,
            specialties: strings(&["limpieza", "jardineria", "fumigacion"]).into_iter().collect(),
        },
        ProviderLocation {
            provider_id: "prov_003".to_string(),
            provider_type: ProviderType::Maintenance,
            business_name: "Técnicos Especializados".to_string(),
            location: santiago_location(-33.4155, -70.5831, "Las Condes 789", "Las Condes"),
            service_radius: 25.0,
            service_areas: strings(&["Las Condes", "Vitacura", "Lo Barnechea"]),
            is_active: true,
            rating: 4.2,
            total_jobs: 95,
            specialties: strings(&["aire_acondicionado", "electrodomesticos", "seguridad"])
                .into_iter()
                .collect(),
        },
    ]
}
