use std::io;
use std::path::PathBuf;

/// Why a guess was turned away without touching the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGuess {
    #[error("'{0}' is not a letter")]
    NotALetter(char),
    #[error("'{0}' has already been guessed")]
    AlreadyGuessed(char),
}

#[derive(Debug, thiserror::Error)]
pub enum HangmanError {
    #[error("'{0}' is not an available difficulty (choose easy, medium or hard)")]
    InvalidDifficulty(String),

    #[error("'{0}' is not an available category")]
    InvalidCategory(String),

    #[error(transparent)]
    InvalidGuess(#[from] InvalidGuess),

    #[error("the round is already over")]
    RoundOver,

    #[error("could not read high scores from {}: {source}", .path.display())]
    PersistenceRead { path: PathBuf, source: io::Error },

    #[error("could not write high scores to {}: {source}", .path.display())]
    PersistenceWrite { path: PathBuf, source: io::Error },

    #[error("could not load word bank from {}: {source}", .path.display())]
    WordBankLoad { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, HangmanError>;
