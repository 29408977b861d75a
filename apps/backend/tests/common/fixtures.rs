//! Test fixtures and factory functions for creating request bodies.

use serde_json::{json, Value};

/// Generate a word list in the import format with `num_words` pairs.
pub fn sample_word_list(num_words: usize) -> String {
    (0..num_words)
        .map(|i| format!("word{} - բառ{}", i + 1, i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Body for POST /api/study/start.
pub fn start_request(direction: &str, method: &str, mode: &str, page_ids: &[i64]) -> Value {
    json!({
        "direction": direction,
        "method": method,
        "mode": mode,
        "page_ids": page_ids,
    })
}

/// Body for a check_field action.
pub fn check_field(word_id: i64, field: usize, answer: &str) -> Value {
    json!({
        "action": "check_field",
        "word_id": word_id,
        "field": field,
        "answer": answer,
    })
}

/// Body for an action that only names the word (next, skip, reveal, ...).
pub fn action(name: &str, word_id: i64) -> Value {
    json!({
        "action": name,
        "word_id": word_id,
    })
}
