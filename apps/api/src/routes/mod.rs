pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::reply::handlers as reply;
use crate::session::handlers as session;
use crate::setup::handlers as setup;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(session::handle_get_session))
        // Setup
        .route(
            "/api/v1/setup",
            get(setup::handle_get_setup)
                .post(setup::handle_submit_setup)
                .delete(setup::handle_clear_setup),
        )
        .route("/api/v1/setup/edit", post(setup::handle_edit_setup))
        // Reply
        .route("/api/v1/reply/generate", post(reply::handle_generate))
        .route("/api/v1/reply/refine", post(reply::handle_refine))
        .route("/api/v1/reply/reset", post(reply::handle_reset))
        .route("/api/v1/reply/export", get(reply::handle_export))
        .with_state(state)
}
