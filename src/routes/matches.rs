use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::{
    FindMatchesRequest, FindMatchesResponse, HealthResponse, NeighborhoodsResponse, RequestError,
};
use crate::services::Catalog;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub matcher: Matcher,
}

/// Configure all neighborhood routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match", web::post().to(find_matches))
        .route("/neighborhoods", web::get().to(list_neighborhoods));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        neighborhoods_loaded: state.catalog.len(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /match
///
/// Request body:
/// ```json
/// {
///   "budget": "low|medium|high",
///   "safetyImportance": 1,
///   "walkabilityImportance": 5,
///   "familyFriendly": true,
///   "quietEnvironment": false
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, RequestError> {
    let preferences = FindMatchesRequest::try_from(body.into_inner())
        .and_then(FindMatchesRequest::into_preferences)
        .map_err(|e| {
            tracing::info!("Validation failed for match request: {}", e);
            e
        })?;

    let outcome = state
        .matcher
        .find_matches(state.catalog.neighborhoods(), &preferences);

    tracing::info!(
        "Returning {} matches for budget={} (from {} neighborhoods, {} skipped)",
        outcome.matches.len(),
        preferences.budget,
        outcome.total_neighborhoods,
        outcome.skipped
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        success: true,
        matches: outcome.matches,
        total_neighborhoods: outcome.total_neighborhoods,
    }))
}

/// Full catalog dump, bypasses the matcher
async fn list_neighborhoods(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(NeighborhoodsResponse {
        neighborhoods: state.catalog.neighborhoods().to_vec(),
        count: state.catalog.len(),
    })
}
