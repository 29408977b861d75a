//! Word ordering for the three study modes.
//!
//! The order is computed once when a session starts. Statistics committed
//! during the session never re-rank it.

use crate::types::{Mode, WordId, WordSnapshot};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Laplace-smoothed mistake rate: `incorrect / (correct + incorrect + 1)`.
pub fn mistake_rate(word: &WordSnapshot) -> f64 {
    let correct = f64::from(word.correct);
    let incorrect = f64::from(word.incorrect);
    incorrect / (correct + incorrect + 1.0)
}

/// Word id sequence for a session, interpreted per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOrder {
    mode: Mode,
    ids: Vec<WordId>,
}

impl WordOrder {
    /// Build the order for `mode` from the session snapshot.
    pub fn build<R: Rng + ?Sized>(mode: Mode, words: &[WordSnapshot], rng: &mut R) -> Self {
        let ids = match mode {
            Mode::Smart => {
                let mut ranked: Vec<&WordSnapshot> = words.iter().collect();
                // sort_by is stable, so equal rates keep input order
                ranked.sort_by(|a, b| mistake_rate(b).total_cmp(&mistake_rate(a)));
                ranked.into_iter().map(|w| w.id).collect()
            }
            Mode::Session => {
                let mut ids: Vec<WordId> = words.iter().map(|w| w.id).collect();
                ids.shuffle(rng);
                ids
            }
            Mode::Random => words.iter().map(|w| w.id).collect(),
        };
        Self { mode, ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[WordId] {
        &self.ids
    }

    /// Word at `cursor` for sequential modes.
    ///
    /// Smart mode cycles through its ranking again after the last word;
    /// session mode yields `None` past the end. Random mode has no
    /// position and always yields `None`.
    pub fn at(&self, cursor: usize) -> Option<WordId> {
        match self.mode {
            Mode::Session => self.ids.get(cursor).copied(),
            Mode::Smart if !self.ids.is_empty() => Some(self.ids[cursor % self.ids.len()]),
            Mode::Smart | Mode::Random => None,
        }
    }

    /// Uniform draw with replacement from the full word set.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<WordId> {
        self.ids.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn word(id: WordId, correct: u32, incorrect: u32) -> WordSnapshot {
        WordSnapshot {
            id,
            page_id: 1,
            english: format!("en{id}"),
            armenian: format!("am{id}"),
            correct,
            incorrect,
        }
    }

    #[test]
    fn mistake_rate_is_smoothed() {
        assert_eq!(mistake_rate(&word(1, 0, 0)), 0.0);
        assert_eq!(mistake_rate(&word(1, 1, 2)), 0.5);
        assert_eq!(mistake_rate(&word(1, 0, 1)), 0.5);
    }

    #[test]
    fn smart_sorts_by_mistake_rate_descending() {
        let words = vec![word(1, 5, 0), word(2, 0, 3), word(3, 1, 1), word(4, 0, 0)];
        let order = WordOrder::build(Mode::Smart, &words, &mut StdRng::seed_from_u64(1));
        assert_eq!(order.ids(), &[2, 3, 1, 4]);
    }

    #[test]
    fn smart_sort_is_stable_for_ties() {
        // 1/2 == 2/4 == 0.5
        let words = vec![word(7, 0, 0), word(3, 1, 2), word(9, 0, 1), word(5, 0, 0)];
        let order = WordOrder::build(Mode::Smart, &words, &mut StdRng::seed_from_u64(1));
        assert_eq!(order.ids(), &[3, 9, 7, 5]);
    }

    #[test]
    fn smart_cycles_after_last_word() {
        let words = vec![word(1, 0, 1), word(2, 0, 0)];
        let order = WordOrder::build(Mode::Smart, &words, &mut StdRng::seed_from_u64(1));
        assert_eq!(order.at(0), Some(1));
        assert_eq!(order.at(1), Some(2));
        assert_eq!(order.at(2), Some(1));
    }

    #[test]
    fn session_order_is_a_permutation() {
        let words: Vec<_> = (1..=20).map(|id| word(id, 0, 0)).collect();
        let order = WordOrder::build(Mode::Session, &words, &mut StdRng::seed_from_u64(42));

        assert_eq!(order.len(), 20);
        let unique: HashSet<_> = order.ids().iter().copied().collect();
        assert_eq!(unique, (1..=20).collect::<HashSet<_>>());
        assert_eq!(order.at(20), None);
    }

    #[test]
    fn random_draws_come_from_the_word_set() {
        let words = vec![word(1, 0, 0), word(2, 0, 0), word(3, 0, 0)];
        let mut rng = StdRng::seed_from_u64(7);
        let order = WordOrder::build(Mode::Random, &words, &mut rng);

        assert_eq!(order.at(0), None);
        for _ in 0..50 {
            let id = order.draw(&mut rng).unwrap();
            assert!((1..=3).contains(&id));
        }
    }

    #[test]
    fn empty_order() {
        let order = WordOrder::build(Mode::Smart, &[], &mut StdRng::seed_from_u64(1));
        assert!(order.is_empty());
        assert_eq!(order.at(0), None);
        assert_eq!(order.draw(&mut StdRng::seed_from_u64(1)), None);
    }
}
