use axum::{routing::get, Router};

use super::handlers::health_check;

/// Health check route (no auth required)
pub fn routes() -> Router {
    Router::new().route("/health", get(health_check))
}
