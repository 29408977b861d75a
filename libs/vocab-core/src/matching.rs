//! Answer matching for write mode study sessions.

use crate::synonyms::SynonymSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Find the first candidate equal to `answer`, ignoring case.
///
/// Candidates are `(index, text)` pairs so callers can skip synonyms that
/// were already answered. The answer is trimmed; nothing else is normalized.
pub fn evaluate<'a, I>(answer: &str, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let answer = answer.trim().to_lowercase();
    candidates
        .into_iter()
        .find(|(_, candidate)| candidate.to_lowercase() == answer)
        .map(|(index, _)| index)
}

/// A revealed first letter of an unused synonym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Index of the synonym the hint was taken from.
    pub index: usize,
    pub letter: String,
    /// Synonyms still available for later hints.
    pub remaining: usize,
}

/// Tracks which synonyms of the current word are used up.
///
/// A synonym is consumed once it is answered correctly or hinted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintPool {
    consumed: BTreeSet<usize>,
}

impl HintPool {
    pub fn consume(&mut self, index: usize) {
        self.consumed.insert(index);
    }

    /// Reveal the first letter of the first unused synonym, in source order.
    ///
    /// Returns `None` once every synonym is consumed.
    pub fn next_hint(&mut self, synonyms: &SynonymSet) -> Option<Hint> {
        let index = (0..synonyms.len()).find(|i| !self.consumed.contains(i))?;
        self.consumed.insert(index);

        let letter = synonyms
            .get(index)
            .and_then(|s| s.chars().next())
            .map(String::from)
            .unwrap_or_default();
        let remaining = (0..synonyms.len())
            .filter(|i| !self.consumed.contains(i))
            .count();

        Some(Hint {
            index,
            letter,
            remaining,
        })
    }
}
