//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Re-export shared types from vocab-core
pub use vocab_core::{
    ActionFeedback, Direction, Method, Mode, Outcome, PageId, StudyOptions, Summary, WordId,
    WordSnapshot, WordView,
};

// === Database Entity Types ===

/// Page stored in SQLite
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPage {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Page with word count and summed statistics
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageSummary {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub word_count: i64,
    pub correct: i64,
    pub incorrect: i64,
}

/// Word joined with its statistics row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWord {
    pub id: i64,
    pub page_id: i64,
    pub english: String,
    pub armenian: String,
    pub correct: i64,
    pub incorrect: i64,
    pub last_studied: Option<DateTime<Utc>>,
}

impl DbWord {
    /// Freeze into the snapshot a study session works from
    pub fn to_snapshot(&self) -> WordSnapshot {
        WordSnapshot {
            id: self.id,
            page_id: self.page_id,
            english: self.english.clone(),
            armenian: self.armenian.clone(),
            correct: clamp_count(self.correct),
            incorrect: clamp_count(self.incorrect),
        }
    }
}

/// Counters saturate at the `u32` range; negative values read as zero.
fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

// === API Types ===

// Page types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePageRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageListResponse {
    pub pages: Vec<PageSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageDetailResponse {
    pub page: DbPage,
    pub words: Vec<DbWord>,
}

// Word types
#[derive(Debug, Serialize, Deserialize)]
pub struct AddWordRequest {
    pub english: String,
    pub armenian: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<DbWord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct StartStudyRequest {
    pub direction: Direction,
    pub method: Method,
    pub mode: Mode,
    pub page_ids: Vec<PageId>,
}

impl StartStudyRequest {
    pub fn options(&self) -> StudyOptions {
        StudyOptions {
            direction: self.direction,
            method: self.method,
            mode: self.mode,
        }
    }
}

/// Labels shown in the session header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLabels {
    pub direction: String,
    pub method: String,
    pub mode: String,
}

impl SessionLabels {
    pub fn from_options(options: StudyOptions) -> Self {
        Self {
            direction: options.direction.label().to_string(),
            method: options.method.label().to_string(),
            mode: options.mode.label().to_string(),
        }
    }
}

/// Either the word to study next or the final summary
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StudyState {
    InProgress {
        labels: SessionLabels,
        word: WordView,
    },
    Complete {
        labels: SessionLabels,
        summary: Summary,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartStudyResponse {
    pub token: String,
    pub state: StudyState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub feedback: ActionFeedback,
    pub state: StudyState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndStudyResponse {
    pub labels: SessionLabels,
    pub summary: Summary,
}
