//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::info::root))
        .route("/health", get(handlers::info::health_check))
        .route("/api/weather", get(handlers::weather::get_weather))
        .with_state(state)
}
