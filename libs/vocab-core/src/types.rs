//! Core types for the vocabulary study application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word identifier (database row id).
pub type WordId = i64;

/// Page identifier (database row id).
pub type PageId = i64;

/// Which language is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    EnToAm,
    AmToEn,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnToAm => "en_to_am",
            Self::AmToEn => "am_to_en",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "en_to_am" => Some(Self::EnToAm),
            "am_to_en" => Some(Self::AmToEn),
            _ => None,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EnToAm => "English → Armenian",
            Self::AmToEn => "Armenian → English",
        }
    }

    /// Split a word into (prompt, target) text for this direction.
    pub fn sides<'a>(&self, word: &'a WordSnapshot) -> (&'a str, &'a str) {
        match self {
            Self::EnToAm => (&word.english, &word.armenian),
            Self::AmToEn => (&word.armenian, &word.english),
        }
    }
}

/// How the learner answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Typed answers, checked field by field.
    Write,
    /// Spoken answers, self-reported after reveal.
    Say,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Say => "say",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "write" => Some(Self::Write),
            "say" => Some(Self::Say),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Write => "Write",
            Self::Say => "Say",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Word selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Highest mistake rate first.
    Smart,
    /// Uniform draw with replacement; never completes on its own.
    Random,
    /// One shuffled pass over every word.
    Session,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Random => "random",
            Self::Session => "session",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "smart" => Some(Self::Smart),
            "random" => Some(Self::Random),
            "session" => Some(Self::Session),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Smart => "Smart Mode",
            Self::Random => "Random Mode",
            Self::Session => "Session Mode",
        }
    }
}

/// Options chosen on the study setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyOptions {
    pub direction: Direction,
    pub method: Method,
    pub mode: Mode,
}

/// Result of one resolved word occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }
}

/// A word as captured when a session starts, with its statistics at that time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSnapshot {
    pub id: WordId,
    pub page_id: PageId,
    pub english: String,
    pub armenian: String,
    pub correct: u32,
    pub incorrect: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word() -> WordSnapshot {
        WordSnapshot {
            id: 1,
            page_id: 1,
            english: "cat".to_string(),
            armenian: "կատու".to_string(),
            correct: 0,
            incorrect: 0,
        }
    }

    #[test]
    fn direction_selects_prompt_and_target() {
        let w = word();
        assert_eq!(Direction::EnToAm.sides(&w), ("cat", "կատու"));
        assert_eq!(Direction::AmToEn.sides(&w), ("կատու", "cat"));
    }

    #[test]
    fn options_parse_from_form_values() {
        assert_eq!(Direction::from_str("am_to_en"), Some(Direction::AmToEn));
        assert_eq!(Method::from_str("say"), Some(Method::Say));
        assert_eq!(Mode::from_str("session"), Some(Mode::Session));
        assert_eq!(Mode::from_str("spaced"), None);
    }

    #[test]
    fn outcome_from_correct_flag() {
        assert_eq!(Outcome::from_correct(true), Outcome::Correct);
        assert_eq!(Outcome::from_correct(false), Outcome::Incorrect);
    }

    #[test]
    fn labels_match_setup_screen() {
        assert_eq!(Direction::AmToEn.label(), "Armenian → English");
        assert_eq!(Method::Write.label(), "Write");
        assert_eq!(Mode::Random.label(), "Random Mode");
    }
}
