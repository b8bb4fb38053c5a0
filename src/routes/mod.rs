// Route exports
pub mod errors;
pub mod matches;

use actix_web::{http::StatusCode, middleware::ErrorHandlers, web};

pub use errors::{handle_json_payload_error, not_found, render_internal_error, JsonError};
pub use matches::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(matches::configure);
}

/// Middleware turning 500 responses into the JSON error body
pub fn internal_error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, render_internal_error)
}
