//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the game and turns single keypresses into
//!   answers for the session loop via `GameInterface`.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `ChoosingDifficulty` → `ChoosingCategory` → `Guessing` → `RoundOver` → back to `ChoosingDifficulty`
//! - Terminal state: `Farewell`

use crate::error::HangmanError;
use crate::gallows::gallows;
use crate::game_state::{GameInterface, UserAction};
use crate::leaderboard::{HighScore, MAX_ENTRIES, render_table};
use crate::round::{GuessOutcome, Player, Round, RoundStatus, RoundSummary};
use crate::wordbank::Difficulty;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const FAREWELL_PAUSE_MS: u64 = 1500;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, PartialEq)]
enum TuiState {
    ChoosingDifficulty,
    ChoosingCategory { categories: Vec<String> },
    Guessing,
    /// Round finished; waiting for the play-again answer.
    RoundOver,
    Farewell,
}

/// What the board shows of the current round.
#[derive(Debug, Default)]
struct RoundView {
    pattern: String,
    guessed: String,
    attempts_remaining: u32,
    score: u32,
}

impl RoundView {
    fn from_round(round: &Round) -> Self {
        Self {
            pattern: round.pattern(),
            guessed: crate::cli::format_guessed(round),
            attempts_remaining: round.attempts_remaining(),
            score: round.score(),
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: &'a TuiState,
    round: Option<&'a RoundView>,
    difficulty: Option<Difficulty>,
    hint: Option<char>,
    leaderboard: &'a [HighScore],
    total_score: u32,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    round: Option<RoundView>,
    difficulty: Option<Difficulty>,
    hint: Option<char>,
    leaderboard: Vec<HighScore>,
    total_score: u32,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::ChoosingDifficulty,
            round: None,
            difficulty: None,
            hint: None,
            leaderboard: Vec::new(),
            total_score: 0,
            message: "Welcome to Hangman!".to_string(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: &self.state,
            round: self.round.as_ref(),
            difficulty: self.difficulty,
            hint: self.hint,
            leaderboard: &self.leaderboard,
            total_score: self.total_score,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(11), // Gallows and word
                Constraint::Min(8),     // Info and leaderboard
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(20)])
            .split(rows[1]);

        let lower = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);

        Self::render_title(f, rows[0]);
        Self::render_gallows(f, board[0], ctx.round);
        Self::render_word(f, board[1], ctx);
        Self::render_info(f, lower[0], ctx);
        Self::render_leaderboard(f, lower[1], ctx.leaderboard);
        Self::render_status(f, rows[3], ctx.status);
        Self::render_instructions(f, rows[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, round: Option<&RoundView>) {
        let attempts = round.map_or(u32::MAX, |r| r.attempts_remaining);
        let lines: Vec<Line> = gallows(attempts).lines().map(Line::from).collect();
        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(round) = ctx.round {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(round.pattern.clone(), WORD_STYLE),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "  Attempts remaining: {}",
                round.attempts_remaining
            )));
            lines.push(Line::from(format!("  Guessed letters: {}", round.guessed)));
            lines.push(Line::from(format!("  Score: {}", round.score)));
            if let Some(letter) = ctx.hint {
                lines.push(Line::from(vec![Span::styled(
                    format!("  Hint: The first letter is '{letter}'"),
                    INFO_STYLE,
                )]));
            }
        } else {
            lines.push(Line::from(""));
            lines.push(Line::from("  No round in progress"));
        }

        let title = match ctx.difficulty {
            Some(d) => format!("Word ({d})"),
            None => "Word".to_string(),
        };
        let paragraph = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        match ctx.state {
            TuiState::ChoosingDifficulty => {
                lines.push(Line::from(vec![Span::styled("Choose difficulty:", HEADER_STYLE)]));
                for (i, d) in Difficulty::ALL.iter().enumerate() {
                    lines.push(Line::from(format!(
                        "  {}. {d} ({} attempts)",
                        i + 1,
                        d.attempts()
                    )));
                }
                lines.push(Line::from(""));
            }
            TuiState::ChoosingCategory { categories } => {
                lines.push(Line::from(vec![Span::styled("Choose a category:", HEADER_STYLE)]));
                for (i, category) in categories.iter().enumerate() {
                    lines.push(Line::from(format!("  {}. {category}", i + 1)));
                }
                lines.push(Line::from(""));
            }
            TuiState::Guessing | TuiState::RoundOver | TuiState::Farewell => {}
        }

        lines.push(Line::from(format!("Total score: {}", ctx.total_score)));

        // Messages
        if !ctx.message.is_empty() {
            let style = if matches!(ctx.state, TuiState::RoundOver) {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        // Error messages
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_leaderboard(f: &mut Frame, area: Rect, entries: &[HighScore]) {
        let lines: Vec<Line> = Self::leaderboard_lines(entries)
            .into_iter()
            .map(Line::from)
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("High Scores").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn leaderboard_lines(entries: &[HighScore]) -> Vec<String> {
        let shown = &entries[..entries.len().min(MAX_ENTRIES)];
        render_table(shown).lines().map(String::from).collect()
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::ChoosingDifficulty => "1/E: Easy | 2/M: Medium | 3/H: Hard | ESC: Quit",
            TuiState::ChoosingCategory { .. } => "Press the category number | ESC: Quit",
            TuiState::Guessing => "Type a letter to guess | ESC: Quit",
            TuiState::RoundOver => "Y: Play again | N / ESC: Quit",
            TuiState::Farewell => "Goodbye!",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Redraws and waits for the next usable key press.
    ///
    /// Mouse, focus, paste and resize events, key releases and stray control
    /// characters are skipped.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            self.draw()?;

            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };

            // Only process Press events, ignore Release and Repeat to avoid double input
            if key.kind != event::KeyEventKind::Press {
                continue;
            }

            if let KeyCode::Char(c) = key.code
                && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
            {
                debug_log!("next_key() - Ignoring control character: {:?}", c);
                continue;
            }

            if Self::has_modifier_keys(&key) {
                debug_log!("next_key() - Ignoring key with modifier: {:?}", key.modifiers);
                continue;
            }

            debug_log!("next_key() - Key: {:?}", key.code);
            return Ok(key);
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn difficulty_for_key(code: KeyCode) -> Option<&'static str> {
        match code {
            KeyCode::Char('1' | 'e' | 'E') => Some("easy"),
            KeyCode::Char('2' | 'm' | 'M') => Some("medium"),
            KeyCode::Char('3' | 'h' | 'H') => Some("hard"),
            _ => None,
        }
    }

    fn category_for_key(code: KeyCode, categories: &[String]) -> Option<String> {
        let KeyCode::Char(c) = code else {
            return None;
        };
        let choice = c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| categories.get(i));
        Some(choice.cloned().unwrap_or_else(|| c.to_string()))
    }

    fn start_prompt(&mut self, state: TuiState, status: &str) {
        self.state = state;
        self.status = status.to_string();
    }
}

impl GameInterface for TuiInterface {
    fn read_difficulty(&mut self) -> Option<String> {
        self.start_prompt(TuiState::ChoosingDifficulty, "Choose a difficulty");
        self.round = None;
        self.hint = None;
        self.difficulty = None;
        loop {
            let key = self.next_key().ok()?;
            match key.code {
                KeyCode::Esc => return None,
                code => {
                    if let Some(name) = Self::difficulty_for_key(code) {
                        self.error_message.clear();
                        self.difficulty = name.parse().ok();
                        return Some(name.to_string());
                    }
                    if let KeyCode::Char(c) = code {
                        return Some(c.to_string());
                    }
                }
            }
        }
    }

    fn read_category(&mut self, difficulty: Difficulty, categories: &[String]) -> Option<String> {
        self.difficulty = Some(difficulty);
        self.start_prompt(
            TuiState::ChoosingCategory {
                categories: categories.to_vec(),
            },
            "Choose a category",
        );
        loop {
            let key = self.next_key().ok()?;
            if key.code == KeyCode::Esc {
                return None;
            }
            if let Some(category) = Self::category_for_key(key.code, categories) {
                self.error_message.clear();
                self.message.clear();
                return Some(category);
            }
        }
    }

    fn display_round(&mut self, round: &Round) {
        self.round = Some(RoundView::from_round(round));
        self.state = TuiState::Guessing;
        self.status = format!("Guessing - {} attempts left", round.attempts_remaining());
        self.draw_or_log();
    }

    fn display_hint(&mut self, letter: char) {
        self.hint = Some(letter);
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> UserAction {
        loop {
            let Ok(key) = self.next_key() else {
                info_log!("read_guess() - Input error, returning Exit");
                return UserAction::Exit;
            };
            match key.code {
                KeyCode::Esc => return UserAction::Exit,
                KeyCode::Char(c) => {
                    self.error_message.clear();
                    return UserAction::Guess(c);
                }
                _ => {}
            }
        }
    }

    fn display_guess_outcome(&mut self, outcome: &GuessOutcome) {
        self.message = match outcome {
            GuessOutcome::Correct { .. } => "Good job! The letter is in the word.".to_string(),
            GuessOutcome::Wrong { .. } => "Sorry, that letter is not in the word.".to_string(),
        };
        self.error_message.clear();
    }

    fn display_error(&mut self, error: &HangmanError) {
        self.error_message = format!("{error}. Try again.");
        self.draw_or_log();
    }

    fn display_round_over(&mut self, round: &Round, summary: &RoundSummary, player: &Player) {
        self.round = Some(RoundView::from_round(round));
        self.total_score = player.total_score;
        self.state = TuiState::RoundOver;
        self.message = match summary.status {
            RoundStatus::Won => format!(
                "Congratulations! You guessed the word: {} (+{} points)",
                summary.target, summary.score
            ),
            _ => format!("Game over! The word was: {}", summary.target),
        };
        self.status = format!("Round score: {} | Total: {}", summary.score, player.total_score);
        self.draw_or_log();
    }

    fn display_warning(&mut self, warning: &HangmanError) {
        self.error_message = format!("Warning: {warning}");
        self.draw_or_log();
    }

    fn display_leaderboard(&mut self, entries: &[HighScore]) {
        self.leaderboard = entries.to_vec();
        self.draw_or_log();
    }

    fn confirm_play_again(&mut self) -> bool {
        self.state = TuiState::RoundOver;
        loop {
            let Ok(key) = self.next_key() else {
                return false;
            };
            match key.code {
                KeyCode::Char('y' | 'Y') => return true,
                KeyCode::Char('n' | 'N') | KeyCode::Esc => return false,
                _ => {}
            }
        }
    }

    fn display_exit_message(&mut self, player: &Player) {
        self.state = TuiState::Farewell;
        self.total_score = player.total_score;
        self.message = format!("Thank you for playing! Your final score: {}", player.total_score);
        self.status = "Exiting...".to_string();
        self.draw_or_log();
        std::thread::sleep(Duration::from_millis(FAREWELL_PAUSE_MS));
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
