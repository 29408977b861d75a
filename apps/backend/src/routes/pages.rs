//! Page endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use vocab_core::parse_word_list;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/pages
pub async fn list(State(state): State<AppState>) -> Result<Json<PageListResponse>> {
    let pages = state.db.list_pages().await?;
    Ok(Json(PageListResponse { pages }))
}

/// POST /api/pages
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePageRequest>,
) -> Result<(StatusCode, Json<DbPage>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Page name is required".to_string()));
    }

    let page = state.db.create_page(name).await?;
    tracing::info!(page_id = page.id, name = %page.name, "page created");
    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/pages/:id
pub async fn get(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
) -> Result<Json<PageDetailResponse>> {
    let page = state
        .db
        .get_page(page_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Page not found".to_string()))?;
    let words = state.db.list_page_words(page_id).await?;
    Ok(Json(PageDetailResponse { page, words }))
}

/// DELETE /api/pages/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
) -> Result<StatusCode> {
    state.db.delete_page(page_id).await?;
    tracing::info!(page_id, "page deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/pages/:id/words
pub async fn words(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
) -> Result<Json<WordListResponse>> {
    if state.db.get_page(page_id).await?.is_none() {
        return Err(ApiError::NotFound("Page not found".to_string()));
    }
    let words = state.db.list_page_words(page_id).await?;
    Ok(Json(WordListResponse { words }))
}

/// POST /api/pages/:id/words
pub async fn add_word(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
    Json(payload): Json<AddWordRequest>,
) -> Result<(StatusCode, Json<DbWord>)> {
    let english = payload.english.trim();
    let armenian = payload.armenian.trim();
    if english.is_empty() || armenian.is_empty() {
        return Err(ApiError::BadRequest(
            "Both english and armenian are required".to_string(),
        ));
    }

    let word = state.db.add_word(page_id, english, armenian).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

/// POST /api/pages/:id/import
///
/// Body is a plain-text word list, one `english - armenian` pair per line.
pub async fn import(
    State(state): State<AppState>,
    Path(page_id): Path<PageId>,
    body: String,
) -> Result<Json<ImportResponse>> {
    let pairs = parse_word_list(&body)?;
    let imported = state.db.import_words(page_id, &pairs).await?;
    tracing::info!(page_id, imported, "word list imported");
    Ok(Json(ImportResponse { imported }))
}
