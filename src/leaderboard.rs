//! Persisted top-10 high score table.
//!
//! Each record is one `Name,Score,YYYY-MM-DD HH:MM:SS` line. The file is
//! rewritten in full after every round with the merged, ranked set.

use crate::error::HangmanError;
use crate::{debug_log, info_log};
use chrono::{Local, NaiveDateTime, Timelike};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MAX_ENTRIES: usize = 10;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_FILE_NAME: &str = "highscores.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
    pub timestamp: NaiveDateTime,
}

impl HighScore {
    pub fn new(name: impl Into<String>, score: u32, timestamp: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            score,
            timestamp,
        }
    }

    /// A record stamped with the current local time, truncated to seconds.
    pub fn now(name: impl Into<String>, score: u32) -> Self {
        let timestamp = Local::now().naive_local();
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self::new(name, score, timestamp)
    }

    /// Parses one persisted line. Returns `None` for anything malformed.
    ///
    /// Fields are split from the right, so commas inside the name survive.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches(['\r', '\n']).rsplitn(3, ',');
        let timestamp = fields.next()?;
        let score = fields.next()?;
        let name = fields.next()?;
        let score = score.trim();
        if score.is_empty() || !score.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let score = score.parse::<u32>().ok()?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT).ok()?;
        Some(Self::new(name, score, timestamp))
    }

    #[must_use]
    pub fn to_line(&self) -> String {
        let name = self.name.replace(['\r', '\n'], " ");
        format!(
            "{},{},{}",
            name,
            self.score,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Parses every line independently, dropping the ones that don't parse.
#[must_use]
pub fn parse_records(data: &str) -> Vec<HighScore> {
    parse_record_bytes(data.as_bytes())
}

/// Byte-level variant of [`parse_records`]: a line that isn't valid UTF-8 is
/// dropped like any other malformed line.
#[must_use]
pub fn parse_record_bytes(data: &[u8]) -> Vec<HighScore> {
    data.split(|&b| b == b'\n')
        .filter_map(|raw| {
            let Ok(line) = std::str::from_utf8(raw) else {
                debug_log!("Dropping non-UTF-8 high score line: {raw:?}");
                return None;
            };
            if line.trim().is_empty() {
                return None;
            }
            let parsed = HighScore::parse_line(line);
            if parsed.is_none() {
                debug_log!("Dropping malformed high score line: {line:?}");
            }
            parsed
        })
        .collect()
}

/// Appends `new_entry`, ranks by score (stable, so earlier records win ties)
/// and keeps the top [`MAX_ENTRIES`].
#[must_use]
pub fn merge(mut entries: Vec<HighScore>, new_entry: HighScore) -> Vec<HighScore> {
    entries.push(new_entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_ENTRIES);
    entries
}

#[must_use]
pub fn serialize(entries: &[HighScore]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_line());
        out.push('\n');
    }
    out
}

/// Formats the table shown after each round: rank, name, score, date.
#[must_use]
pub fn render_table(entries: &[HighScore]) -> String {
    if entries.is_empty() {
        return "No high scores yet.\n".to_string();
    }
    let name_width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());
    let mut out = String::new();
    let _ = writeln!(out, "{:<4} {:<name_width$} {:>6}  Date", "Rank", "Name", "Score");
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<name_width$} {:>6}  {}",
            format!("{}.", i + 1),
            entry.name,
            entry.score,
            entry.timestamp.format(DATE_FORMAT)
        );
    }
    out
}

/// Result of recording a round: the ranked table plus any storage problems.
///
/// `entries` always includes the new record, even when persistence failed.
#[derive(Debug)]
pub struct RecordOutcome {
    pub entries: Vec<HighScore>,
    pub warnings: Vec<HangmanError>,
}

pub trait ScoreStore {
    fn record(&self, entry: HighScore) -> RecordOutcome;
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new() -> Self {
        Self {
            path: default_scores_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored table. A missing file is an empty table.
    pub fn load(&self) -> Result<Vec<HighScore>, HangmanError> {
        match fs::read(&self.path) {
            Ok(data) => Ok(parse_record_bytes(&data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(HangmanError::PersistenceRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Writes the whole table to a sibling temp file and renames it into place.
    pub fn save(&self, entries: &[HighScore]) -> Result<(), HangmanError> {
        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, serialize(entries))?;
            fs::rename(&tmp, &self.path).inspect_err(|_| {
                let _ = fs::remove_file(&tmp);
            })
        };
        write().map_err(|source| HangmanError::PersistenceWrite {
            path: self.path.clone(),
            source,
        })
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn record(&self, entry: HighScore) -> RecordOutcome {
        let mut warnings = Vec::new();
        let existing = self.load().unwrap_or_else(|e| {
            log::warn!("{e}; starting a fresh high score table");
            warnings.push(e);
            Vec::new()
        });
        let entries = merge(existing, entry);
        if let Err(e) = self.save(&entries) {
            log::warn!("{e}");
            warnings.push(e);
        } else {
            info_log!("Saved {} high scores to {}", entries.len(), self.path.display());
        }
        RecordOutcome { entries, warnings }
    }
}

/// `<data dir>/hangman/highscores.txt`, or the working directory if the
/// platform has no data dir.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("hangman").join(DEFAULT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
}
