use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/view/:button", get(handlers::show_view))
        .route("/workout", post(handlers::submit_workout))
        .route("/workout/feedback", post(handlers::submit_feedback))
        .route("/diet", post(handlers::submit_meal))
        .route("/assist", post(handlers::submit_assist))
        .route("/api/health", get(handlers::health))
        .route("/api/plan/render", post(handlers::render_payload))
        .with_state(state)
}
