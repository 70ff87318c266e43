use hangman::cli::{CliInterface, parse_cli};
use hangman::game_state::game_loop;
use hangman::leaderboard::FileScoreStore;
use hangman::logging;
use hangman::tui::TuiInterface;
use hangman::wordbank::{WordBank, load_wordbank_from_file};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::borrow::Cow;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.tui);

    let bank: Cow<'static, WordBank> = match &cli.wordbank_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(bank) => Cow::Owned(bank),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Cow::Borrowed(WordBank::embedded()),
    };
    log::info!("Loaded {} words", bank.len());

    let store = match &cli.scores_path {
        Some(path) => FileScoreStore::with_path(path),
        None => FileScoreStore::new(),
    };
    log::info!("High scores at {}", store.path().display());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if cli.tui {
        let player = match TuiInterface::new() {
            Ok(mut tui) => game_loop(&bank, &store, &mut tui, &mut rng, &cli.player_name),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        println!("Thank you for playing! Your final score: {}", player.total_score);
    } else {
        println!("Welcome to Hangman!");
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&bank, &store, &mut interface, &mut rng, &cli.player_name);
    }

    ExitCode::SUCCESS
}
