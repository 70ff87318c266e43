// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod gallows;
pub mod game_state;
pub mod leaderboard;
pub mod logging;
pub mod round;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{HangmanError, InvalidGuess};
pub use game_state::{GameInterface, UserAction, game_loop, play_round};
pub use leaderboard::{FileScoreStore, HighScore, RecordOutcome, ScoreStore};
pub use round::{GuessOutcome, Player, Round, RoundStatus, RoundSummary};
pub use wordbank::{Difficulty, RandomSource, WordBank, load_wordbank_from_file, load_wordbank_from_str};
