use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{handlers, home, middleware::set_cors_headers, state::SharedState};

/// Create the main application router with all API endpoints
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // Landing page
        .route("/", get(home::get_home))
        // Health check
        .route("/health", get(handlers::health_check))
        // Formatting endpoints
        .route("/api/datetime", get(handlers::get_date_time))
        .route("/api/currency", get(handlers::format_currency))
        .route("/api/evolution", post(handlers::get_evolution))
        .route(
            "/api/evolution/taxes",
            post(handlers::get_evolution_with_taxes),
        )
        // CORS headers on every response
        .layer(middleware::from_fn_with_state(
            state.clone(),
            set_cors_headers,
        ))
        // Add shared state
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
