//! Parser for imported word lists.
//!
//! # Format
//! ```text
//! # Lesson 3
//! cat - կատու
//! big, large - մեծ
//! well-known-հայտնի
//! ```
//!
//! One pair per line. The pair is split at ` - ` when present, otherwise at
//! the last `-`, so hyphenated English words survive. Blank lines and lines
//! starting with `#` are skipped.

use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};

/// English/Armenian pair read from an import file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub english: String,
    pub armenian: String,
    pub line_number: usize,
}

/// Parse a word list into pairs.
pub fn parse_word_list(content: &str) -> Result<Vec<WordPair>> {
    let mut pairs = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        match parse_line(line) {
            LineType::Empty | LineType::Comment => {}
            LineType::Pair(english, armenian) => {
                pairs.push(build_pair(english, armenian, line_num)?);
            }
            LineType::Invalid => return Err(ParseError::MissingSeparator { line: line_num }),
        }
    }

    Ok(pairs)
}

enum LineType<'a> {
    Pair(&'a str, &'a str),
    Comment,
    Empty,
    Invalid,
}

fn parse_line(line: &str) -> LineType<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        LineType::Empty
    } else if trimmed.starts_with('#') {
        LineType::Comment
    } else if let Some((english, armenian)) = trimmed.split_once(" - ") {
        LineType::Pair(english, armenian)
    } else if let Some((english, armenian)) = trimmed.rsplit_once('-') {
        LineType::Pair(english, armenian)
    } else {
        LineType::Invalid
    }
}

fn build_pair(english: &str, armenian: &str, line: usize) -> Result<WordPair> {
    let english = english.trim();
    let armenian = armenian.trim();

    if english.is_empty() {
        return Err(ParseError::MissingEnglish { line });
    }
    if armenian.is_empty() {
        return Err(ParseError::MissingArmenian { line });
    }

    Ok(WordPair {
        english: english.to_string(),
        armenian: armenian.to_string(),
        line_number: line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_pair() {
        let pairs = parse_word_list("cat - կատու").unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].english, "cat");
        assert_eq!(pairs[0].armenian, "կատու");
        assert_eq!(pairs[0].line_number, 1);
    }

    #[test]
    fn parse_without_spaces() {
        let pairs = parse_word_list("dog-շուն").unwrap();
        assert_eq!(pairs[0].english, "dog");
        assert_eq!(pairs[0].armenian, "շուն");
    }

    #[test]
    fn hyphenated_english_keeps_its_hyphen() {
        let pairs = parse_word_list("well-known-հայտնի\nself-made - ինքնաշեն").unwrap();
        assert_eq!(pairs[0].english, "well-known");
        assert_eq!(pairs[0].armenian, "հայտնի");
        assert_eq!(pairs[1].english, "self-made");
        assert_eq!(pairs[1].armenian, "ինքնաշեն");
    }

    #[test]
    fn synonyms_are_kept_verbatim() {
        let pairs = parse_word_list("big, large - մեծ, խոշոր").unwrap();
        assert_eq!(pairs[0].english, "big, large");
        assert_eq!(pairs[0].armenian, "մեծ, խոշոր");
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let input = "# Lesson 1\n\ncat - կատու\n   \ndog - շուն\n";
        let pairs = parse_word_list(input).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].line_number, 5);
    }

    #[test]
    fn reject_missing_separator() {
        let result = parse_word_list("cat - կատու\nկատու");
        assert_eq!(result, Err(ParseError::MissingSeparator { line: 2 }));
    }

    #[test]
    fn reject_missing_sides() {
        assert_eq!(
            parse_word_list(" - կատու"),
            Err(ParseError::MissingEnglish { line: 1 })
        );
        assert_eq!(
            parse_word_list("cat -"),
            Err(ParseError::MissingArmenian { line: 1 })
        );
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse_word_list("").unwrap().is_empty());
    }
}
