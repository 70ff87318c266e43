use crate::error::HangmanError;
use crate::gallows::gallows;
use crate::game_state::{GameInterface, UserAction};
use crate::leaderboard::{HighScore, render_table};
use crate::round::{GuessOutcome, Player, Round, RoundStatus, RoundSummary};
use crate::wordbank::Difficulty;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman: guess the word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a word bank file with `difficulty,category,word` lines
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Where to keep the high score table
    #[arg(short = 's', long = "scores")]
    pub scores_path: Option<PathBuf>,

    /// Name recorded next to your scores
    #[arg(short = 'n', long = "name", default_value = "Player")]
    pub player_name: String,

    /// Seed for word selection, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Reads one trimmed line. `None` on end of input or a read error.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn read_difficulty<R: BufRead>(reader: &mut R) -> Option<String> {
    println!("\nChoose difficulty (Easy, Medium, Hard):");
    read_line(reader)
}

pub fn read_category<R: BufRead>(
    reader: &mut R,
    difficulty: Difficulty,
    categories: &[String],
) -> Option<String> {
    println!("Choose a category for {difficulty} ({}):", categories.join(", "));
    read_line(reader)
}

/// First non-whitespace character of the next non-blank line.
pub fn read_guess<R: BufRead>(reader: &mut R) -> UserAction {
    loop {
        println!("Enter a letter:");
        let Some(line) = read_line(reader) else {
            return UserAction::Exit;
        };
        if let Some(c) = line.chars().next() {
            return UserAction::Guess(c);
        }
    }
}

pub fn read_yes_no<R: BufRead>(reader: &mut R) -> bool {
    println!("Would you like to play again? (Y/N):");
    read_line(reader)
        .and_then(|line| line.chars().next())
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

#[must_use]
pub fn format_guessed(round: &Round) -> String {
    round
        .guessed_letters()
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn display_round(round: &Round) {
    println!("\n{}", gallows(round.attempts_remaining()));
    println!("Word to guess: {}", round.pattern());
    println!("Attempts remaining: {}", round.attempts_remaining());
    println!("Guessed letters: {}", format_guessed(round));
    println!("Score: {}", round.score());
}

pub fn display_hint(letter: char) {
    println!("Hint: The first letter is '{letter}'");
}

pub fn display_guess_outcome(outcome: &GuessOutcome) {
    match outcome {
        GuessOutcome::Correct { positions_revealed } => {
            let times = if *positions_revealed == 1 { "once" } else { "more than once" };
            println!("Good job! The letter appears {times} in the word.");
        }
        GuessOutcome::Wrong { attempts_remaining } => {
            println!("Sorry, that letter is not in the word. {attempts_remaining} attempts left.");
        }
    }
}

pub fn display_error(error: &HangmanError) {
    println!("{error}. Try again.");
}

pub fn display_round_over(round: &Round, summary: &RoundSummary, player: &Player) {
    println!("\n{}", gallows(round.attempts_remaining()));
    match summary.status {
        RoundStatus::Won => println!("Congratulations! You guessed the word: {}", summary.target),
        _ => println!("Game over! The word was: {}", summary.target),
    }
    println!("Your score for this round: {}", summary.score);
    println!("Total score: {}", player.total_score);
}

pub fn display_warning(warning: &HangmanError) {
    println!("Warning: {warning}");
}

pub fn display_leaderboard(entries: &[HighScore]) {
    println!("\nHigh scores:");
    print!("{}", render_table(entries));
}

pub fn display_exit_message(player: &Player) {
    println!("Thank you for playing! Your final score: {}", player.total_score);
}

/// Line-oriented front end over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_difficulty(&mut self) -> Option<String> {
        read_difficulty(&mut self.reader)
    }

    fn read_category(&mut self, difficulty: Difficulty, categories: &[String]) -> Option<String> {
        read_category(&mut self.reader, difficulty, categories)
    }

    fn display_round(&mut self, round: &Round) {
        display_round(round);
    }

    fn display_hint(&mut self, letter: char) {
        display_hint(letter);
    }

    fn read_guess(&mut self) -> UserAction {
        read_guess(&mut self.reader)
    }

    fn display_guess_outcome(&mut self, outcome: &GuessOutcome) {
        display_guess_outcome(outcome);
    }

    fn display_error(&mut self, error: &HangmanError) {
        display_error(error);
    }

    fn display_round_over(&mut self, round: &Round, summary: &RoundSummary, player: &Player) {
        display_round_over(round, summary, player);
    }

    fn display_warning(&mut self, warning: &HangmanError) {
        display_warning(warning);
    }

    fn display_leaderboard(&mut self, entries: &[HighScore]) {
        display_leaderboard(entries);
    }

    fn confirm_play_again(&mut self) -> bool {
        read_yes_no(&mut self.reader)
    }

    fn display_exit_message(&mut self, player: &Player) {
        display_exit_message(player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.scores_path, None);
        assert_eq!(cli.player_name, "Player");
        assert_eq!(cli.seed, None);
        assert!(!cli.tui);
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::try_parse_from([
            "hangman", "-i", "words.txt", "-s", "scores.txt", "-n", "Ada", "--seed", "42", "--tui",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert_eq!(cli.scores_path, Some(PathBuf::from("scores.txt")));
        assert_eq!(cli.player_name, "Ada");
        assert_eq!(cli.seed, Some(42));
        assert!(cli.tui);
    }

    #[test]
    fn test_parse_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["hangman", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_read_difficulty_trims() {
        let mut reader = Cursor::new("  Hard  \n");
        assert_eq!(read_difficulty(&mut reader), Some("Hard".to_string()));
    }

    #[test]
    fn test_read_difficulty_end_of_input() {
        let mut reader = Cursor::new("");
        assert_eq!(read_difficulty(&mut reader), None);
    }

    #[test]
    fn test_read_category() {
        let mut reader = Cursor::new("animals\n");
        let categories = vec!["animals".to_string(), "countries".to_string()];
        assert_eq!(
            read_category(&mut reader, Difficulty::Easy, &categories),
            Some("animals".to_string())
        );
    }

    #[test]
    fn test_read_guess_takes_first_character() {
        let mut reader = Cursor::new("  apple\n");
        assert_eq!(read_guess(&mut reader), UserAction::Guess('a'));
    }

    #[test]
    fn test_read_guess_skips_blank_lines() {
        let mut reader = Cursor::new("\n   \n7\n");
        assert_eq!(read_guess(&mut reader), UserAction::Guess('7'));
    }

    #[test]
    fn test_read_guess_end_of_input_exits() {
        let mut reader = Cursor::new("\n");
        assert_eq!(read_guess(&mut reader), UserAction::Exit);
    }

    #[test]
    fn test_read_yes_no() {
        assert!(read_yes_no(&mut Cursor::new("y\n")));
        assert!(read_yes_no(&mut Cursor::new("Yes\n")));
        assert!(!read_yes_no(&mut Cursor::new("n\n")));
        assert!(!read_yes_no(&mut Cursor::new("\n")));
        assert!(!read_yes_no(&mut Cursor::new("")));
    }

    #[test]
    fn test_format_guessed_is_sorted() {
        let mut round = Round::new("cat", 6);
        round.apply_guess('t').unwrap();
        round.apply_guess('q').unwrap();
        round.apply_guess('a').unwrap();
        assert_eq!(format_guessed(&round), "a, q, t");
    }
}
