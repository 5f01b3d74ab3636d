use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/home", get(handlers::home_feed))
        .route("/home/slots/:slot", get(handlers::home_slot))
        // Catalog
        .route("/games", get(handlers::list_games))
        .route("/games/:game_id", get(handlers::game_details))
        .route("/games/:game_id/similar", get(handlers::similar_games))
        // Accounts
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/interactions", post(handlers::record_interaction))
}
