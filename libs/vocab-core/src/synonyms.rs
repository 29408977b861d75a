//! Synonym splitting for translation fields.
//!
//! A translation field such as `"big, large"` holds every acceptable answer
//! separated by commas. Each piece becomes one answer field in write mode.

use serde::{Deserialize, Serialize};

/// Ordered list of acceptable answers split from one translation field.
///
/// Always holds at least one element. Source order is kept for hints;
/// comparisons against user input ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymSet(Vec<String>);

impl SynonymSet {
    /// Split on `,` and trim each piece. Empty pieces are kept.
    pub fn parse(text: &str) -> Self {
        Self(text.split(',').map(|s| s.trim().to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
