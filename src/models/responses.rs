use serde::{Deserialize, Serialize};
use crate::models::domain::ProviderSearchResult;

/// Response for the provider search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProvidersResponse {
    pub results: Vec<ProviderSearchResult>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
