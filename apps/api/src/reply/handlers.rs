//! Axum route handlers for the Reply API.
//!
//! Each handler locks the session only to apply an event. The model call runs
//! with the lock released; the Generating/Refining phase keeps a second
//! trigger out in the meantime. If the request is dropped mid-call, an
//! `InFlightGuard` applies the failure event so the session is never left busy.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::{AppError, GENERATION_FAILED_MESSAGE};
use crate::reply::export::{clipboard_text, field_text, ExportField};
use crate::reply::generator::{generate_reply, refine_reply};
use crate::reply::models::{GenerateRequest, GeneratedResponse, RefineRequest};
use crate::session::{Event, Session, SessionError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub field: Option<ExportField>,
}

/// Applies `on_drop` to the session unless disarmed. Armed for the span of a
/// model call, so a cancelled request still ends in an interactive phase.
struct InFlightGuard {
    session: Arc<Mutex<Session>>,
    on_drop: Option<Event>,
}

impl InFlightGuard {
    fn new(session: Arc<Mutex<Session>>, on_drop: Event) -> Self {
        Self {
            session,
            on_drop: Some(on_drop),
        }
    }

    /// Call with the session lock held, right before applying the outcome.
    fn disarm(mut self) {
        self.on_drop = None;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let Some(event) = self.on_drop.take() else {
            return;
        };
        warn!("Request dropped while a model call was in flight; releasing the session");
        match self.session.try_lock() {
            Ok(mut session) => release(&mut session, event),
            Err(_) => {
                let session = Arc::clone(&self.session);
                if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                    runtime.spawn(async move {
                        release(&mut *session.lock().await, event);
                    });
                }
            }
        }
    }
}

fn release(session: &mut Session, event: Event) {
    match session.apply(event) {
        Ok(next) => *session = next,
        Err(e) => warn!("Session already left the in-flight phase: {e}"),
    }
}

/// POST /api/v1/reply/generate
///
/// Generates a translation and two replies for the submitted review.
/// A blank comment is a no-op: 204, nothing called, session untouched.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response, AppError> {
    let review = request.into_review()?;
    if review.is_blank() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let config = {
        let mut session = state.session.lock().await;
        let next = session.apply(Event::GenerationStarted(review.clone()))?;
        let config = next.config.clone().ok_or(SessionError::NotConfigured)?;
        *session = next;
        config
    };

    let guard = InFlightGuard::new(
        Arc::clone(&state.session),
        Event::GenerationFailed(GENERATION_FAILED_MESSAGE.to_string()),
    );
    let result = generate_reply(state.llm.as_ref(), &review, &config).await;

    let mut session = state.session.lock().await;
    guard.disarm();
    match result {
        Ok(response) => {
            *session = session.apply(Event::GenerationSucceeded(response.clone()))?;
            Ok(Json(response).into_response())
        }
        Err(e) => {
            *session =
                session.apply(Event::GenerationFailed(GENERATION_FAILED_MESSAGE.to_string()))?;
            Err(e)
        }
    }
}

/// POST /api/v1/reply/refine
///
/// Polishes the edited Turkish reply and re-translates it. Only the two reply
/// fields of the displayed response change.
pub async fn handle_refine(
    State(state): State<AppState>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let (config, target_language) = {
        let mut session = state.session.lock().await;
        let next = session.apply(Event::RefineStarted)?;
        let config = next.config.clone().ok_or(SessionError::NotConfigured)?;
        let detected = next
            .response()
            .map(|r| r.detected_language.clone())
            .ok_or(SessionError::NoResponse)?;
        *session = next;
        let target = request
            .target_language
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(detected);
        (config, target)
    };

    let guard = InFlightGuard::new(Arc::clone(&state.session), Event::RefineFailed);
    let result = refine_reply(
        state.llm.as_ref(),
        &request.turkish_reply,
        &target_language,
        &config,
    )
    .await;

    let mut session = state.session.lock().await;
    guard.disarm();
    match result {
        Ok(refined) => {
            *session = session.apply(Event::RefineSucceeded(refined))?;
            let response = session.response().cloned().ok_or(SessionError::NoResponse)?;
            info!("Reply refined into {target_language}");
            Ok(Json(response))
        }
        Err(e) => {
            *session = session.apply(Event::RefineFailed)?;
            Err(e)
        }
    }
}

/// POST /api/v1/reply/reset
///
/// Clears the review fields and any result or error. Safe to repeat.
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<Session>, AppError> {
    let mut session = state.session.lock().await;
    *session = session.apply(Event::Reset)?;
    Ok(Json(session.clone()))
}

/// GET /api/v1/reply/export[?field=translation|original|turkish]
///
/// Clipboard-ready text for the displayed response.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    let response = session
        .response()
        .ok_or_else(|| AppError::NotFound("No generated response to export".to_string()))?;

    let text = match query.field {
        Some(field) => field_text(response, field).to_string(),
        None => clipboard_text(response),
    };

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}
