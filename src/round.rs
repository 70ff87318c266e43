//! Round state machine.
//!
//! A [`Round`] owns the target word, the revealed pattern, guessed letters,
//! remaining attempts and score for one play-through. [`Round::apply_guess`] is
//! the only transition; once the round is won or lost it accepts nothing else.

use crate::error::{HangmanError, InvalidGuess, Result};
use crate::debug_log;
use std::collections::BTreeSet;

pub const PLACEHOLDER: char = '_';
pub const POINTS_PER_LETTER: u32 = 10;
pub const COMPLETION_BONUS: u32 = 50;
pub const HINT_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { positions_revealed: usize },
    Wrong { attempts_remaining: u32 },
}

/// Final result of a finished round. The target is always disclosed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub status: RoundStatus,
    pub target: String,
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct Round {
    target: Vec<char>,
    revealed: Vec<char>,
    guessed_letters: BTreeSet<char>,
    attempts_remaining: u32,
    score: u32,
    hint_given: bool,
    status: RoundStatus,
}

impl Round {
    pub fn new(target: &str, attempts: u32) -> Self {
        let target: Vec<char> = target.to_lowercase().chars().collect();
        let status = if target.is_empty() {
            RoundStatus::Won
        } else if attempts == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        };
        Self {
            revealed: vec![PLACEHOLDER; target.len()],
            target,
            guessed_letters: BTreeSet::new(),
            attempts_remaining: attempts,
            score: 0,
            hint_given: false,
            status,
        }
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    #[must_use]
    pub fn revealed(&self) -> &[char] {
        &self.revealed
    }

    /// Revealed pattern with letters separated by spaces, e.g. `c _ t`.
    #[must_use]
    pub fn pattern(&self) -> String {
        let mut out = String::with_capacity(self.revealed.len() * 2);
        for (i, c) in self.revealed.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(*c);
        }
        out
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn hint_given(&self) -> bool {
        self.hint_given
    }

    /// Target word, available only once the round has finished.
    #[must_use]
    pub fn disclosed_target(&self) -> Option<String> {
        self.is_over().then(|| self.target.iter().collect())
    }

    #[must_use]
    pub fn summary(&self) -> Option<RoundSummary> {
        Some(RoundSummary {
            status: self.status,
            target: self.disclosed_target()?,
            score: self.score,
        })
    }

    /// One-shot hint: the first letter of the target once attempts drop to
    /// [`HINT_THRESHOLD`] or below. Leaves the pattern and score alone.
    pub fn take_hint(&mut self) -> Option<char> {
        if self.hint_given
            || self.status != RoundStatus::InProgress
            || self.attempts_remaining > HINT_THRESHOLD
        {
            return None;
        }
        let first = *self.target.first()?;
        self.hint_given = true;
        debug_log!("Hint given: {first}");
        Some(first)
    }

    pub fn apply_guess(&mut self, letter: char) -> Result<GuessOutcome> {
        if self.is_over() {
            return Err(HangmanError::RoundOver);
        }
        if !letter.is_ascii_alphabetic() {
            return Err(InvalidGuess::NotALetter(letter).into());
        }
        let letter = letter.to_ascii_lowercase();
        if !self.guessed_letters.insert(letter) {
            return Err(InvalidGuess::AlreadyGuessed(letter).into());
        }

        let mut positions_revealed = 0;
        for (slot, &c) in self.revealed.iter_mut().zip(&self.target) {
            if c == letter {
                *slot = c;
                positions_revealed += 1;
            }
        }

        if positions_revealed == 0 {
            self.attempts_remaining -= 1;
            if self.attempts_remaining == 0 {
                self.status = RoundStatus::Lost;
            }
            debug_log!(
                "Guess '{letter}' missed, {} attempts left",
                self.attempts_remaining
            );
            return Ok(GuessOutcome::Wrong {
                attempts_remaining: self.attempts_remaining,
            });
        }

        self.score += POINTS_PER_LETTER * positions_revealed as u32;
        if !self.revealed.contains(&PLACEHOLDER) {
            self.status = RoundStatus::Won;
            self.score += COMPLETION_BONUS;
        }
        debug_log!("Guess '{letter}' revealed {positions_revealed}, score {}", self.score);
        Ok(GuessOutcome::Correct { positions_revealed })
    }
}

/// A player's running tally across rounds of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub total_score: u32,
    pub round_scores: Vec<u32>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_score: 0,
            round_scores: Vec::new(),
        }
    }

    pub fn record_round(&mut self, score: u32) {
        self.round_scores.push(score);
        self.total_score += score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_is_all_placeholders() {
        let round = Round::new("cat", 8);
        assert_eq!(round.revealed(), ['_', '_', '_']);
        assert_eq!(round.pattern(), "_ _ _");
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.attempts_remaining(), 8);
        assert_eq!(round.score(), 0);
        assert!(!round.hint_given());
        assert_eq!(round.status(), RoundStatus::InProgress);
        assert_eq!(round.disclosed_target(), None);
    }

    #[test]
    fn test_empty_target_is_already_won() {
        let mut round = Round::new("", 8);
        assert!(round.revealed().is_empty());
        assert_eq!(round.status(), RoundStatus::Won);
        assert!(matches!(round.apply_guess('a'), Err(HangmanError::RoundOver)));
        assert_eq!(round.attempts_remaining(), 8);
    }

    #[test]
    fn test_cat_on_easy() {
        let mut round = Round::new("cat", 8);

        assert_eq!(
            round.apply_guess('a').unwrap(),
            GuessOutcome::Correct { positions_revealed: 1 }
        );
        assert_eq!(round.revealed(), ['_', 'a', '_']);
        assert_eq!(round.score(), 10);

        round.apply_guess('c').unwrap();
        assert_eq!(round.score(), 20);

        assert_eq!(
            round.apply_guess('z').unwrap(),
            GuessOutcome::Wrong { attempts_remaining: 7 }
        );
        assert_eq!(round.score(), 20);

        round.apply_guess('t').unwrap();
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.score(), 80);
        assert_eq!(round.attempts_remaining(), 7);
        assert_eq!(
            round.summary(),
            Some(RoundSummary {
                status: RoundStatus::Won,
                target: "cat".to_string(),
                score: 80,
            })
        );
    }

    #[test]
    fn test_dog_on_hard_is_lost() {
        let mut round = Round::new("dog", 4);
        for (i, letter) in ['x', 'y', 'z', 'q'].into_iter().enumerate() {
            assert_eq!(
                round.apply_guess(letter).unwrap(),
                GuessOutcome::Wrong {
                    attempts_remaining: 3 - i as u32
                }
            );
        }
        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(round.attempts_remaining(), 0);
        assert_eq!(round.score(), 0);
        assert_eq!(round.disclosed_target().as_deref(), Some("dog"));
    }

    #[test]
    fn test_repeated_letter_rejected_without_change() {
        let mut round = Round::new("cat", 6);
        round.apply_guess('c').unwrap();
        round.apply_guess('q').unwrap();
        let before = (round.score(), round.attempts_remaining(), round.pattern());

        assert!(matches!(
            round.apply_guess('c'),
            Err(HangmanError::InvalidGuess(InvalidGuess::AlreadyGuessed('c')))
        ));
        assert!(matches!(
            round.apply_guess('q'),
            Err(HangmanError::InvalidGuess(InvalidGuess::AlreadyGuessed('q')))
        ));
        assert_eq!(
            (round.score(), round.attempts_remaining(), round.pattern()),
            before
        );
    }

    #[test]
    fn test_uppercase_counts_as_same_letter() {
        let mut round = Round::new("cat", 6);
        round.apply_guess('C').unwrap();
        assert_eq!(round.revealed(), ['c', '_', '_']);
        assert!(round.guessed_letters().contains(&'c'));
        assert!(matches!(
            round.apply_guess('c'),
            Err(HangmanError::InvalidGuess(InvalidGuess::AlreadyGuessed('c')))
        ));
    }

    #[test]
    fn test_non_letters_always_rejected() {
        let mut round = Round::new("cat", 6);
        for c in ['3', ' ', '-', '!', 'é'] {
            assert!(matches!(
                round.apply_guess(c),
                Err(HangmanError::InvalidGuess(InvalidGuess::NotALetter(_)))
            ));
        }
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.attempts_remaining(), 6);
    }

    #[test]
    fn test_repeated_letters_score_per_position() {
        let mut round = Round::new("banana", 6);
        assert_eq!(
            round.apply_guess('a').unwrap(),
            GuessOutcome::Correct { positions_revealed: 3 }
        );
        assert_eq!(round.score(), 30);
        assert_eq!(round.pattern(), "_ a _ a _ a");
    }

    #[test]
    fn test_full_coverage_wins_and_reveals_word() {
        for word in ["elephant", "japan", "rhythm", "a"] {
            let mut round = Round::new(word, 4);
            for c in word.chars() {
                let _ = round.apply_guess(c);
            }
            let revealed: String = round.revealed().iter().collect();
            assert_eq!(revealed, word);
            assert_eq!(round.status(), RoundStatus::Won);
        }
    }

    #[test]
    fn test_score_never_decreases_and_bonus_once() {
        let mut round = Round::new("zebra", 8);
        let mut last = 0;
        for c in ['q', 'z', 'z', '1', 'e', 'x', 'b', 'r', 'a'] {
            let _ = round.apply_guess(c);
            assert!(round.score() >= last);
            last = round.score();
        }
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.score(), 5 * POINTS_PER_LETTER + COMPLETION_BONUS);
        assert!(matches!(round.apply_guess('k'), Err(HangmanError::RoundOver)));
        assert_eq!(round.score(), 100);
    }

    #[test]
    fn test_guess_after_loss_is_rejected() {
        let mut round = Round::new("dog", 1);
        round.apply_guess('x').unwrap();
        assert_eq!(round.status(), RoundStatus::Lost);
        assert!(matches!(round.apply_guess('d'), Err(HangmanError::RoundOver)));
        assert_eq!(round.pattern(), "_ _ _");
    }

    #[test]
    fn test_hint_given_once_at_threshold() {
        let mut round = Round::new("tiger", 6);
        assert_eq!(round.take_hint(), None);
        round.apply_guess('x').unwrap();
        round.apply_guess('y').unwrap();
        assert_eq!(round.take_hint(), None);
        round.apply_guess('z').unwrap();
        assert_eq!(round.attempts_remaining(), 3);
        assert_eq!(round.take_hint(), Some('t'));
        assert!(round.hint_given());
        assert_eq!(round.take_hint(), None);
        round.apply_guess('q').unwrap();
        assert_eq!(round.take_hint(), None);
        assert_eq!(round.pattern(), "_ _ _ _ _");
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn test_hard_hint_after_first_miss() {
        let mut round = Round::new("dog", 4);
        assert_eq!(round.take_hint(), None);
        round.apply_guess('x').unwrap();
        assert_eq!(round.take_hint(), Some('d'));
    }

    #[test]
    fn test_player_accumulates_rounds() {
        let mut player = Player::new("Ada");
        player.record_round(80);
        player.record_round(0);
        player.record_round(120);
        assert_eq!(player.total_score, 200);
        assert_eq!(player.round_scores, vec![80, 0, 120]);
    }
}
