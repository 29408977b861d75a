//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext backed by a private in-memory SQLite database
//! - Helpers for creating pages and words directly in the database
//! - Session token header helpers

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;

use vocab_study_backend::db::Database;
use vocab_study_backend::models::{DbWord, PageId, WordId};
use vocab_study_backend::routes::session::SESSION_HEADER;
use vocab_study_backend::{build_router, AppState};

/// Test context containing database connection and router.
///
/// Every context owns its own in-memory database, so tests are isolated.
pub struct TestContext {
    pub db: Arc<Database>,
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if the database cannot be opened or migrated.
    pub async fn new() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(db);
        let app = build_router(state.clone());

        Self {
            db: state.db.clone(),
            state,
            app,
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a page holding the given (english, armenian) pairs.
    pub async fn create_page_with_words(
        &self,
        name: &str,
        words: &[(&str, &str)],
    ) -> (PageId, Vec<WordId>) {
        let page = self
            .db
            .create_page(name)
            .await
            .expect("Failed to create test page");

        let mut ids = Vec::with_capacity(words.len());
        for (english, armenian) in words {
            let word = self
                .db
                .add_word(page.id, english, armenian)
                .await
                .expect("Failed to add test word");
            ids.push(word.id);
        }
        (page.id, ids)
    }

    /// Fetch a word with its statistics.
    pub async fn word(&self, word_id: WordId) -> DbWord {
        self.db
            .get_word(word_id)
            .await
            .expect("Failed to load word")
            .expect("Word should exist")
    }

    /// Header pair carrying a study session token.
    pub fn session_header(token: &str) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(SESSION_HEADER),
            HeaderValue::from_str(token).expect("token should be a valid header value"),
        )
    }
}
