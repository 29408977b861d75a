//! Study endpoints

use axum::{extract::State, http::HeaderMap, Extension, Json};
use uuid::Uuid;
use vocab_core::Action;

use crate::error::Result;
use crate::models::*;
use crate::routes::session::{token_from_headers, SessionToken};
use crate::services::study;
use crate::AppState;

/// POST /api/study/start
///
/// Reuses the caller's session token when one is sent, so starting again
/// replaces the previous session.
pub async fn start(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<StartStudyRequest>,
) -> Result<Json<StartStudyResponse>> {
    let token = token_from_headers(&headers).unwrap_or_else(Uuid::new_v4);
    let study_state = study::start(&state.db, &state.sessions, token, &payload).await?;
    Ok(Json(StartStudyResponse {
        token: token.to_string(),
        state: study_state,
    }))
}

/// GET /api/study/current
pub async fn current(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<StudyState>> {
    let study_state = study::current(&state.sessions, token).await?;
    Ok(Json(study_state))
}

/// POST /api/study/action
pub async fn action(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Json(payload): Json<Action>,
) -> Result<Json<ActionResponse>> {
    let response = study::act(&state.db, &state.sessions, token, payload).await?;
    Ok(Json(response))
}

/// POST /api/study/end
pub async fn end(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<EndStudyResponse>> {
    let response = study::end(&state.sessions, token).await?;
    Ok(Json(response))
}
