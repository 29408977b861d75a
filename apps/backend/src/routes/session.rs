//! Study session token middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;
use vocab_core::SessionError;

use crate::error::Result;
use crate::AppState;

/// Header carrying the opaque study session token
pub const SESSION_HEADER: &str = "x-session-token";

/// Token of an active session, stored in request extensions
#[derive(Clone, Copy, Debug)]
pub struct SessionToken(pub Uuid);

/// Parse the session token header, if present and well formed
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Rejects requests that do not belong to an active study session
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let token = token_from_headers(request.headers()).ok_or(SessionError::NoActiveSession)?;

    if !state.sessions.contains(token).await {
        return Err(SessionError::NoActiveSession.into());
    }

    request.extensions_mut().insert(SessionToken(token));

    Ok(next.run(request).await)
}
