pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate screening pipeline
        .route(
            "/candidate/submitDetails",
            post(handlers::handle_submit_details),
        )
        .route(
            "/candidate/submitLanguages",
            post(handlers::handle_submit_languages),
        )
        .route(
            "/candidate/submitAnswers",
            post(handlers::handle_submit_answers),
        )
        // Bulk question pool
        .route("/generate-questions", get(handlers::handle_generate_pool))
        .with_state(state)
}
