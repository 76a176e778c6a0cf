use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        // Account routes
        .route("/api/register", post(handlers::handle_register))
        .route("/api/verify", post(handlers::handle_verify))
        .route("/api/login", post(handlers::handle_login))

        // Voting routes
        .route("/api/vote", post(handlers::handle_vote))
        .route("/api/results", get(handlers::get_results))
        .route("/api/time_left", get(handlers::get_time_left))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .with_state(state)
}
