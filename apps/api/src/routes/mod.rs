pub mod form;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::curation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::form_handler))
        .route("/health", get(health::health_handler))
        // Curation API
        .route("/api/v1/curations", post(handlers::handle_curate))
        .route(
            "/api/v1/curations/prompt",
            post(handlers::handle_preview_prompt),
        )
        .with_state(state)
}
