use crate::error::{HangmanError, Result};
use crate::debug_log;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

static EMBEDDED: LazyLock<WordBank> = LazyLock::new(|| load_wordbank_from_str(EMBEDDED_WORDBANK));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Wrong guesses allowed before the round is lost.
    #[must_use]
    pub fn attempts(self) -> u32 {
        match self {
            Self::Easy => 8,
            Self::Medium => 6,
            Self::Hard => 4,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = HangmanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Ok(Self::Easy),
            "medium" | "m" => Ok(Self::Medium),
            "hard" | "h" => Ok(Self::Hard),
            _ => Err(HangmanError::InvalidDifficulty(s.trim().to_string())),
        }
    }
}

/// Uniform index picker used for word selection.
///
/// Sessions use a seeded or entropy-backed `StdRng`; tests plug in fixed sources.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for rand::rngs::StdRng {
    fn pick(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }
}

impl RandomSource for rand::rngs::ThreadRng {
    fn pick(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }
}

/// Immutable difficulty x category lookup of candidate words.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    words: BTreeMap<(Difficulty, String), Vec<String>>,
}

impl WordBank {
    /// The built-in table, parsed once on first use.
    #[must_use]
    pub fn embedded() -> &'static WordBank {
        &EMBEDDED
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }

    /// Categories registered for `difficulty`, in sorted order.
    #[must_use]
    pub fn categories(&self, difficulty: Difficulty) -> Vec<String> {
        self.words
            .keys()
            .filter(|(d, _)| *d == difficulty)
            .map(|(_, category)| category.clone())
            .collect()
    }

    #[must_use]
    pub fn words(&self, difficulty: Difficulty, category: &str) -> Option<&[String]> {
        self.words
            .get(&(difficulty, category.trim().to_lowercase()))
            .map(Vec::as_slice)
    }

    /// Picks a word uniformly at random from the `(difficulty, category)` list.
    pub fn select_word<R: RandomSource + ?Sized>(
        &self,
        difficulty: Difficulty,
        category: &str,
        rng: &mut R,
    ) -> Result<String> {
        let words = self
            .words(difficulty, category)
            .filter(|words| !words.is_empty())
            .ok_or_else(|| HangmanError::InvalidCategory(category.trim().to_string()))?;
        let word = words[rng.pick(words.len())].clone();
        debug_log!("select_word({difficulty}, {category}) -> {word}");
        Ok(word)
    }

    fn insert(&mut self, difficulty: Difficulty, category: String, word: String) {
        let list = self.words.entry((difficulty, category)).or_default();
        if !list.contains(&word) {
            list.push(word);
        }
    }
}

fn parse_entry(line: &str) -> Option<(Difficulty, String, String)> {
    let mut fields = line.split(',').map(str::trim);
    let (Some(difficulty), Some(category), Some(word), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };
    let difficulty = difficulty.parse().ok()?;
    let category = category.to_lowercase();
    let word = word.to_lowercase();
    if category.is_empty() || word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((difficulty, category, word))
}

pub fn load_wordbank_from_str(data: &str) -> WordBank {
    let mut bank = WordBank::default();
    for line in data.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_entry(line) {
            Some((difficulty, category, word)) => bank.insert(difficulty, category, word),
            None => {
                debug_log!("Skipping word bank line: {line:?}");
            }
        }
    }
    bank
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<WordBank> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| HangmanError::WordBankLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let bank = load_wordbank_from_str(&data);
    if bank.is_empty() {
        return Err(HangmanError::WordBankLoad {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "no usable entries"),
        });
    }
    Ok(bank)
}
