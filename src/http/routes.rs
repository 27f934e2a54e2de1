use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:session_id/start", post(handlers::start_session))
        .route("/sessions/answer", post(handlers::submit_answer))
        .route("/sessions/complete", post(handlers::complete_session))
        // Current-question cursor
        .route("/sessions/current/question", get(handlers::current_question))
        .route("/sessions/current/next", post(handlers::next_question))
        .route(
            "/sessions/current/previous",
            post(handlers::previous_question),
        )
        .route(
            "/sessions/current/progress",
            get(handlers::session_progress),
        )
        // Job description analysis
        .route("/analyze/job", post(handlers::analyze_job))
        // Progress & export
        .route("/progress/stats", get(handlers::progress_stats))
        .route("/progress/export", get(handlers::export_data))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
