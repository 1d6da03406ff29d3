use axum::{extract::State, Json};

use crate::session::Session;
use crate::state::AppState;

/// GET /api/v1/session
///
/// Snapshot of everything the client renders: screen, config, review fields and phase.
pub async fn handle_get_session(State(state): State<AppState>) -> Json<Session> {
    Json(state.session.lock().await.clone())
}
