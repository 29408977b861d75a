//! Core vocabulary study library used by the backend.
//!
//! Provides:
//! - Word-list parser for the flat "english - armenian" import format
//! - Synonym splitting for translation fields
//! - Answer matching and hint bookkeeping for typed answers
//! - Word ordering for smart, random and session modes
//! - The study session state machine

pub mod error;
pub mod matching;
pub mod ordering;
pub mod parser;
pub mod session;
pub mod synonyms;
pub mod types;

pub use error::{ParseError, Result, SessionError};
pub use matching::{evaluate, Hint, HintPool};
pub use ordering::{mistake_rate, WordOrder};
pub use parser::{parse_word_list, WordPair};
pub use session::{
    Action, ActionFeedback, Commit, FieldState, Progress, SessionStats, StudySession, Summary,
    Transition, WordView, WrongWord,
};
pub use synonyms::SynonymSet;
pub use types::{Direction, Method, Mode, Outcome, PageId, StudyOptions, WordId, WordSnapshot};
