pub mod error;
pub mod health;
pub mod metrics;
pub mod preferences;
pub mod tickets;

use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;

/// API routes of the dashboard service, without the metrics endpoint and layers.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/tickets/{id}/eligibility",
            get(tickets::get_eligibility),
        )
        .route(
            "/api/v1/tickets/{id}/{action}",
            post(tickets::perform_action),
        )
        .route(
            "/api/v1/preferences/columns/{table}",
            get(preferences::get_column_preferences),
        )
        .with_state(state)
}
