use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Neighborhood};

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub success: bool,
    pub matches: Vec<MatchResult>,
    pub total_neighborhoods: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub neighborhoods_loaded: usize,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Full catalog dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborhoodsResponse {
    pub neighborhoods: Vec<Neighborhood>,
    pub count: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub status_code: u16,
}
