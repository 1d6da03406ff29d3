//! Axum route handlers for the Setup API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::session::{Event, Session};
use crate::setup::collector::{clear, collect, prefill};
use crate::setup::models::{MerchantConfig, SetupForm};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /api/v1/setup
///
/// The values the setup form opens with.
pub async fn handle_get_setup(State(state): State<AppState>) -> Json<MerchantConfig> {
    let session = state.session.lock().await;
    Json(prefill(session.config.as_ref(), session.saved.as_ref()))
}

/// POST /api/v1/setup
///
/// Validates the form, persists it, and moves the session to the main screen.
pub async fn handle_submit_setup(
    State(state): State<AppState>,
    Json(form): Json<SetupForm>,
) -> Result<Json<MerchantConfig>, AppError> {
    let config = collect(form)?;

    let mut session = state.session.lock().await;
    let next = session.apply(Event::ConfigSubmitted(config.clone()))?;
    state.store.save(&config).await?;
    *session = next;

    info!("Setup completed for '{}'", config.app_name);
    Ok(Json(config))
}

/// POST /api/v1/setup/edit
///
/// Returns from the main screen to the setup form, keeping the active config as prefill.
pub async fn handle_edit_setup(State(state): State<AppState>) -> Result<Json<Session>, AppError> {
    let mut session = state.session.lock().await;
    *session = session.apply(Event::EditSettings)?;
    Ok(Json(session.clone()))
}

/// DELETE /api/v1/setup?confirm=true
///
/// Wipes the form and the persisted copy. Without `confirm=true` nothing changes.
pub async fn handle_clear_setup(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Result<Json<MerchantConfig>, AppError> {
    let empty = clear(query.confirm)?;

    let mut session = state.session.lock().await;
    let next = session.apply(Event::ConfigCleared)?;
    state.store.clear().await?;
    *session = next;

    info!("Setup cleared");
    Ok(Json(empty))
}
