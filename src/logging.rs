// Logger setup plus conditional logging macros that are only active in debug builds

use env_logger::{Builder, Env, Target};
use std::fs::{self, File};
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "warn";

/// Log file used while the full-screen interface owns the terminal.
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hangman").join("hangman.log"))
}

/// Installs `env_logger`, honouring `RUST_LOG`.
///
/// With `to_file` set, output goes to [`log_file_path`] so it never draws over
/// the TUI; if that file can't be opened, logging is left off.
pub fn init(to_file: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if to_file {
        let Some(file) = log_file_path().and_then(|path| {
            fs::create_dir_all(path.parent()?).ok()?;
            File::create(path).ok()
        }) else {
            return;
        };
        builder.target(Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
