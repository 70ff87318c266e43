use crate::error::HangmanError;
use crate::leaderboard::{HighScore, ScoreStore};
use crate::round::{GuessOutcome, Player, Round, RoundSummary};
use crate::wordbank::{Difficulty, RandomSource, WordBank};
use crate::{debug_log, info_log};

/// Input collected while a round is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Exit,
}

/// Everything the session loop needs from a front end.
///
/// Selection prompts return `None` when the player wants to leave.
pub trait GameInterface {
    fn read_difficulty(&mut self) -> Option<String>;
    fn read_category(&mut self, difficulty: Difficulty, categories: &[String]) -> Option<String>;
    fn display_round(&mut self, round: &Round);
    fn display_hint(&mut self, letter: char);
    fn read_guess(&mut self) -> UserAction;
    fn display_guess_outcome(&mut self, outcome: &GuessOutcome);
    fn display_error(&mut self, error: &HangmanError);
    fn display_round_over(&mut self, round: &Round, summary: &RoundSummary, player: &Player);
    fn display_warning(&mut self, warning: &HangmanError);
    fn display_leaderboard(&mut self, entries: &[HighScore]);
    fn confirm_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self, player: &Player);
}

/// Runs rounds until the player declines another or exits.
///
/// Each finished round is added to the returned [`Player`] and recorded in
/// `store`. A round abandoned part-way is not recorded.
pub fn game_loop<I, R>(
    bank: &WordBank,
    store: &dyn ScoreStore,
    interface: &mut I,
    rng: &mut R,
    player_name: &str,
) -> Player
where
    I: GameInterface + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut player = Player::new(player_name);

    loop {
        let Some(difficulty) = choose_difficulty(bank, interface) else {
            break;
        };
        let Some(word) = choose_word(bank, difficulty, interface, rng) else {
            break;
        };

        info_log!("Starting {difficulty} round with a {}-letter word", word.len());
        let mut round = Round::new(&word, difficulty.attempts());
        let Some(summary) = play_round(&mut round, interface) else {
            info_log!("Round abandoned");
            break;
        };

        player.record_round(summary.score);
        interface.display_round_over(&round, &summary, &player);

        let outcome = store.record(HighScore::now(&player.name, summary.score));
        for warning in &outcome.warnings {
            interface.display_warning(warning);
        }
        interface.display_leaderboard(&outcome.entries);

        if !interface.confirm_play_again() {
            break;
        }
    }

    interface.display_exit_message(&player);
    player
}

fn choose_difficulty<I: GameInterface + ?Sized>(
    bank: &WordBank,
    interface: &mut I,
) -> Option<Difficulty> {
    loop {
        let input = interface.read_difficulty()?;
        match input.parse::<Difficulty>() {
            Ok(difficulty) if !bank.categories(difficulty).is_empty() => return Some(difficulty),
            Ok(_) => interface.display_error(&HangmanError::InvalidDifficulty(input)),
            Err(e) => interface.display_error(&e),
        }
    }
}

fn choose_word<I, R>(
    bank: &WordBank,
    difficulty: Difficulty,
    interface: &mut I,
    rng: &mut R,
) -> Option<String>
where
    I: GameInterface + ?Sized,
    R: RandomSource + ?Sized,
{
    let categories = bank.categories(difficulty);
    loop {
        let category = interface.read_category(difficulty, &categories)?;
        match bank.select_word(difficulty, &category, rng) {
            Ok(word) => return Some(word),
            Err(e) => {
                debug_log!("Category rejected: {e}");
                interface.display_error(&e);
            }
        }
    }
}

/// Drives one round to completion. `None` if the player exits mid-round.
pub fn play_round<I: GameInterface + ?Sized>(
    round: &mut Round,
    interface: &mut I,
) -> Option<RoundSummary> {
    while !round.is_over() {
        interface.display_round(round);
        if let Some(letter) = round.take_hint() {
            interface.display_hint(letter);
        }
        let UserAction::Guess(letter) = interface.read_guess() else {
            return None;
        };
        match round.apply_guess(letter) {
            Ok(outcome) => interface.display_guess_outcome(&outcome),
            Err(e) => interface.display_error(&e),
        }
    }
    round.summary()
}
