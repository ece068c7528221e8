//! Process-wide logger for `PulseDash`.
//!
//! A global level plus two runtime switches (debug, verbose) and an optional file
//! sink. Cargo features `log-info`, `log-debug`, `verbose` and `file-logging` decide
//! what can be switched on at all; the runtime calls become no-ops without them.

use std::fmt::{self, Arguments};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;

/// Message severity, most severe first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Failures the user must see
    Error = 1,
    /// Recoverable problems
    Warn = 2,
    /// Progress (needs `log-info`)
    Info = 3,
    /// Diagnostics (needs `log-debug` and [`enable_debug`])
    Debug = 4,
}

impl Level {
    /// Parse a level name (case-insensitive). Accepts the short aliases `err` and `warning`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Lowercase name, as accepted by [`Level::parse`]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Bracketed tag written in front of every message
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Most verbose level the compiled features allow
    const fn ceiling() -> Self {
        if cfg!(feature = "log-debug") {
            Self::Debug
        } else if cfg!(feature = "log-info") {
            Self::Info
        } else {
            Self::Warn
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Level::ceiling() as u8);
static DEBUG: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static SINK: Mutex<Option<File>> = Mutex::new(None);

/// Set the global log level.
pub fn set_level(level: Level) {
    LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(LEVEL.load(Ordering::SeqCst))
}

/// Parse a level name and set it. Returns `false` (level unchanged) for unknown names.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    Level::parse(level).map(set_level).is_some()
}

/// Let `debug!` messages through when the level allows them.
pub fn enable_debug() {
    DEBUG.store(cfg!(feature = "log-debug"), Ordering::SeqCst);
}

/// Whether `debug!` messages are switched on.
#[must_use]
pub fn is_debug_enabled() -> bool {
    DEBUG.load(Ordering::SeqCst)
}

/// Switch `verbose!` output on.
pub fn enable_verbose() {
    VERBOSE.store(cfg!(feature = "verbose"), Ordering::SeqCst);
}

/// Whether `verbose!` output is switched on.
#[must_use]
pub fn is_verbose_enabled() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Send log lines to `path` (appending) instead of the terminal.
///
/// Parent directories are created. Returns `false` when the file cannot be opened
/// or the crate was built without `file-logging`.
#[must_use]
pub fn init_file_logging(path: &Path) -> bool {
    if !cfg!(feature = "file-logging") {
        return false;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    SINK.lock().map(|mut sink| *sink = Some(file)).is_ok()
}

/// Write to the file sink. Returns `false` when there is none.
fn write_to_sink(line: &str) -> bool {
    let Ok(mut sink) = SINK.lock() else {
        return false;
    };
    sink.as_mut().is_some_and(|file| {
        let _ = writeln!(file, "{line}");
        let _ = file.flush();
        true
    })
}

fn should_log(level: Level) -> bool {
    level <= Level::ceiling()
        && level <= self::level()
        && (level != Level::Debug || is_debug_enabled())
}

/// Dispatcher behind the logging macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let line = format!("{} {args}", level.tag());
    if write_to_sink(&line) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

#[macro_export]
/// Logs an error-level message.
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message.
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message.
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message.
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints to stdout when verbose output is on. Never written to the log file.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}
