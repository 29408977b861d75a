//! Study session state machine.
//!
//! A session owns one pass of study over a fixed snapshot of words. Each
//! request from the learner becomes an [`Action`]; [`StudySession::apply`]
//! turns the current state and the action into a [`Transition`] holding the
//! next state and at most one statistics [`Commit`] for the store.
//!
//! The caller persists the commit first and only then keeps the new state,
//! so a failed write never shows up in the session aggregates.
//!
//! Per word occurrence:
//! - write: check each answer field (or reveal all) until the word resolves
//! - say: reveal, then `mark_wrong` or `next`
//!
//! Statistics are committed at most once per occurrence. The guard resets
//! only when the cursor moves on (`next`, `mark_wrong`, `skip`).

use crate::error::SessionError;
use crate::matching::{evaluate, Hint, HintPool};
use crate::ordering::WordOrder;
use crate::synonyms::SynonymSet;
use crate::types::{Method, Mode, Outcome, StudyOptions, WordId, WordSnapshot};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, SessionError>;

/// Learner action against the current word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Check one typed answer field (write).
    CheckField {
        word_id: WordId,
        field: usize,
        answer: String,
    },
    /// First letter of an unused synonym (write).
    Hint { word_id: WordId },
    /// Show the answer before self-grading (say).
    Reveal { word_id: WordId },
    /// Give up on the remaining fields; counts as a miss (write).
    RevealAll { word_id: WordId },
    /// Record a miss and move on.
    MarkWrong { word_id: WordId },
    /// Move on. In say mode this records the word as known.
    Next { word_id: WordId },
    /// Move on without recording anything.
    Skip { word_id: WordId },
}

impl Action {
    pub fn word_id(&self) -> WordId {
        match self {
            Self::CheckField { word_id, .. }
            | Self::Hint { word_id }
            | Self::Reveal { word_id }
            | Self::RevealAll { word_id }
            | Self::MarkWrong { word_id }
            | Self::Next { word_id }
            | Self::Skip { word_id } => *word_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckField { .. } => "check_field",
            Self::Hint { .. } => "hint",
            Self::Reveal { .. } => "reveal",
            Self::RevealAll { .. } => "reveal_all",
            Self::MarkWrong { .. } => "mark_wrong",
            Self::Next { .. } => "next",
            Self::Skip { .. } => "skip",
        }
    }

    fn supports(&self, method: Method) -> bool {
        match self {
            Self::CheckField { .. } | Self::Hint { .. } | Self::RevealAll { .. } => {
                method == Method::Write
            }
            Self::Reveal { .. } => method == Method::Say,
            Self::MarkWrong { .. } | Self::Next { .. } | Self::Skip { .. } => true,
        }
    }
}

/// Check state of one answer field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub checked: bool,
    pub correct: bool,
    pub user_answer: String,
    /// Synonym index the answer matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<usize>,
}

/// Statistics update the store must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub word_id: WordId,
    pub outcome: Outcome,
    pub at: DateTime<Utc>,
}

/// What an action did, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionFeedback {
    FieldChecked {
        field: usize,
        correct: bool,
        resolved: bool,
    },
    /// The field was already checked for this occurrence; nothing changed.
    CheckIgnored { field: usize },
    Hint(Hint),
    NoHintsLeft,
    Revealed,
    Advanced,
}

/// Result of applying an action.
#[derive(Debug, Clone)]
pub struct Transition {
    pub session: StudySession,
    pub commit: Option<Commit>,
    pub feedback: ActionFeedback,
}

/// A missed word for the end-of-session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongWord {
    pub prompt: String,
    pub answer: String,
}

/// Running counters for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
}

/// Position in a session-mode pass (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Current word as shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordView {
    pub id: WordId,
    pub prompt: String,
    pub answers: SynonymSet,
    /// Unsplit target text, shown on reveal.
    pub display: String,
    pub fields: BTreeMap<usize, FieldState>,
    pub revealed: bool,
    pub all_revealed: bool,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

/// End-of-session aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub words_studied: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// Percentage rounded to one decimal, 0 when nothing was studied.
    pub accuracy: f64,
    pub wrong_words: Vec<WrongWord>,
}

/// State of one study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    options: StudyOptions,
    words: Vec<WordSnapshot>,
    order: WordOrder,
    cursor: usize,
    stats: SessionStats,
    /// Word pinned for the current occurrence.
    current: Option<WordId>,
    fields: BTreeMap<usize, FieldState>,
    hints: HintPool,
    word_stats_updated: bool,
    revealed: bool,
    all_revealed: bool,
    wrong_words: Vec<WrongWord>,
}

impl StudySession {
    /// Start a session over `words`.
    ///
    /// An empty word set is only valid in session mode, where the session
    /// is complete immediately.
    pub fn start<R: Rng + ?Sized>(
        options: StudyOptions,
        words: Vec<WordSnapshot>,
        rng: &mut R,
    ) -> Result<Self> {
        if words.is_empty() && options.mode != Mode::Session {
            return Err(SessionError::NoWordsSelected);
        }

        let order = WordOrder::build(options.mode, &words, rng);
        Ok(Self {
            options,
            words,
            order,
            cursor: 0,
            stats: SessionStats::default(),
            current: None,
            fields: BTreeMap::new(),
            hints: HintPool::default(),
            word_stats_updated: false,
            revealed: false,
            all_revealed: false,
            wrong_words: Vec::new(),
        })
    }

    pub fn options(&self) -> StudyOptions {
        self.options
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn wrong_words(&self) -> &[WrongWord] {
        &self.wrong_words
    }

    /// Only session mode finishes on its own.
    pub fn is_complete(&self) -> bool {
        self.options.mode == Mode::Session && self.cursor >= self.order.len()
    }

    /// Resolve the word to show and pin it for this occurrence.
    ///
    /// A pinned word wins; otherwise random mode draws a fresh word and the
    /// other modes read the order at the cursor.
    pub fn current_word<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<WordView> {
        if self.is_complete() {
            return Err(SessionError::NoCurrentWord);
        }
        let id = match self.active_word_id() {
            Some(id) => id,
            None => self.order.draw(rng).ok_or(SessionError::NoCurrentWord)?,
        };
        let view = self.view_of(id)?;
        self.current = Some(id);
        Ok(view)
    }

    /// Pure transition: the current state is left untouched.
    pub fn apply(&self, action: Action, now: DateTime<Utc>) -> Result<Transition> {
        let mut session = self.clone();
        let (commit, feedback) = session.step(action, now)?;
        Ok(Transition {
            session,
            commit,
            feedback,
        })
    }

    /// Aggregates for the session so far.
    pub fn summary(&self) -> Summary {
        let SessionStats {
            correct,
            incorrect,
            total,
        } = self.stats;
        // one decimal, ties to even
        let accuracy = if total > 0 {
            let pct = f64::from(correct) / f64::from(total) * 100.0;
            (pct * 10.0).round_ties_even() / 10.0
        } else {
            0.0
        };
        Summary {
            words_studied: total,
            correct,
            incorrect,
            accuracy,
            wrong_words: self.wrong_words.clone(),
        }
    }

    /// End the session explicitly and hand back its summary.
    pub fn end(self) -> Summary {
        self.summary()
    }

    fn step(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<(Option<Commit>, ActionFeedback)> {
        let method = self.options.method;
        if !action.supports(method) {
            return Err(SessionError::UnsupportedAction {
                action: action.name(),
                method,
            });
        }

        let word_id = action.word_id();
        self.word(word_id)?;
        let active = self.active_word_id().ok_or(SessionError::NoCurrentWord)?;
        if active != word_id {
            return Err(SessionError::NotCurrentWord {
                expected: active,
                got: word_id,
            });
        }
        self.current = Some(word_id);

        match action {
            Action::CheckField { field, answer, .. } => self.check_field(word_id, field, &answer, now),
            Action::Hint { .. } => {
                let answers = self.answers(word_id)?;
                let feedback = match self.hints.next_hint(&answers) {
                    Some(hint) => ActionFeedback::Hint(hint),
                    None => ActionFeedback::NoHintsLeft,
                };
                Ok((None, feedback))
            }
            Action::Reveal { .. } => {
                self.revealed = true;
                Ok((None, ActionFeedback::Revealed))
            }
            Action::RevealAll { .. } => {
                let commit = self.resolve(word_id, Outcome::Incorrect, now)?;
                self.all_revealed = true;
                Ok((commit, ActionFeedback::Revealed))
            }
            Action::MarkWrong { .. } => {
                let commit = self.resolve(word_id, Outcome::Incorrect, now)?;
                self.advance();
                Ok((commit, ActionFeedback::Advanced))
            }
            Action::Next { .. } => {
                let commit = match method {
                    Method::Say => self.resolve(word_id, Outcome::Correct, now)?,
                    Method::Write => None,
                };
                self.advance();
                Ok((commit, ActionFeedback::Advanced))
            }
            Action::Skip { .. } => {
                self.advance();
                Ok((None, ActionFeedback::Advanced))
            }
        }
    }

    fn check_field(
        &mut self,
        word_id: WordId,
        field: usize,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<(Option<Commit>, ActionFeedback)> {
        let answers = self.answers(word_id)?;
        let count = answers.len();
        if field >= count {
            return Err(SessionError::InvalidFieldIndex {
                index: field,
                count,
            });
        }
        if self.fields.get(&field).is_some_and(|f| f.checked) {
            return Ok((None, ActionFeedback::CheckIgnored { field }));
        }

        // a synonym already matched by another field cannot be reused
        let taken: Vec<usize> = self.fields.values().filter_map(|f| f.matched).collect();
        let matched = evaluate(
            answer,
            answers.iter().enumerate().filter(|(i, _)| !taken.contains(i)),
        );
        if let Some(index) = matched {
            self.hints.consume(index);
        }
        let correct = matched.is_some();
        self.fields.insert(
            field,
            FieldState {
                checked: true,
                correct,
                user_answer: answer.trim().to_string(),
                matched,
            },
        );

        let all_checked = (0..count).all(|i| self.fields.get(&i).is_some_and(|f| f.checked));
        let commit = if all_checked {
            let all_correct = self.fields.values().all(|f| f.correct);
            self.resolve(word_id, Outcome::from_correct(all_correct), now)?
        } else {
            None
        };

        Ok((
            commit,
            ActionFeedback::FieldChecked {
                field,
                correct,
                resolved: self.word_stats_updated,
            },
        ))
    }

    /// Record the outcome of this occurrence unless it was already recorded.
    fn resolve(
        &mut self,
        word_id: WordId,
        outcome: Outcome,
        now: DateTime<Utc>,
    ) -> Result<Option<Commit>> {
        if self.word_stats_updated {
            return Ok(None);
        }

        let (prompt, display) = {
            let word = self.word(word_id)?;
            let (prompt, target) = self.options.direction.sides(word);
            (prompt.to_string(), target.to_string())
        };

        self.word_stats_updated = true;
        self.stats.total += 1;
        match outcome {
            Outcome::Correct => self.stats.correct += 1,
            Outcome::Incorrect => {
                self.stats.incorrect += 1;
                self.wrong_words.push(WrongWord {
                    prompt,
                    answer: display,
                });
            }
        }

        Ok(Some(Commit {
            word_id,
            outcome,
            at: now,
        }))
    }

    /// Start a new occurrence.
    fn advance(&mut self) {
        self.current = None;
        self.fields.clear();
        self.hints = HintPool::default();
        self.word_stats_updated = false;
        self.revealed = false;
        self.all_revealed = false;
        if self.options.mode != Mode::Random {
            self.cursor += 1;
        }
    }

    fn active_word_id(&self) -> Option<WordId> {
        self.current.or_else(|| match self.options.mode {
            Mode::Random => None,
            Mode::Smart | Mode::Session => self.order.at(self.cursor),
        })
    }

    fn word(&self, id: WordId) -> Result<&WordSnapshot> {
        self.words
            .iter()
            .find(|w| w.id == id)
            .ok_or(SessionError::UnknownWordId(id))
    }

    fn answers(&self, id: WordId) -> Result<SynonymSet> {
        let word = self.word(id)?;
        let (_, target) = self.options.direction.sides(word);
        Ok(SynonymSet::parse(target))
    }

    fn view_of(&self, id: WordId) -> Result<WordView> {
        let word = self.word(id)?;
        let (prompt, target) = self.options.direction.sides(word);
        let progress = match self.options.mode {
            Mode::Session => Some(Progress {
                current: self.cursor + 1,
                total: self.order.len(),
            }),
            Mode::Smart | Mode::Random => None,
        };

        Ok(WordView {
            id,
            prompt: prompt.to_string(),
            answers: SynonymSet::parse(target),
            display: target.to_string(),
            fields: self.fields.clone(),
            revealed: self.revealed,
            all_revealed: self.all_revealed,
            resolved: self.word_stats_updated,
            progress,
        })
    }
}
