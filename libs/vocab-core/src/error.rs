//! Error types for vocab-core.

use crate::types::{Method, WordId};
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing an imported word list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing separator at line {line}")]
    MissingSeparator { line: usize },

    #[error("missing english word at line {line}")]
    MissingEnglish { line: usize },

    #[error("missing armenian word at line {line}")]
    MissingArmenian { line: usize },
}

/// Errors raised by the study session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no words found for the selected pages")]
    NoWordsSelected,

    #[error("no active study session")]
    NoActiveSession,

    #[error("word {0} is not part of this session")]
    UnknownWordId(WordId),

    #[error("session has no current word")]
    NoCurrentWord,

    #[error("word {got} is not the current word (expected {expected})")]
    NotCurrentWord { expected: WordId, got: WordId },

    #[error("field {index} out of range for {count} answer fields")]
    InvalidFieldIndex { index: usize, count: usize },

    #[error("action {action} is not available for the {method} method")]
    UnsupportedAction { action: &'static str, method: Method },
}
