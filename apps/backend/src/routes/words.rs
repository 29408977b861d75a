//! Word endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/words/:id
pub async fn get(
    State(state): State<AppState>,
    Path(word_id): Path<WordId>,
) -> Result<Json<DbWord>> {
    let word = state
        .db
        .get_word(word_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Word not found".to_string()))?;
    Ok(Json(word))
}

/// DELETE /api/words/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(word_id): Path<WordId>,
) -> Result<StatusCode> {
    state.db.delete_word(word_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
