//! File-based debug logger for troubleshooting
//!
//! Global logger that appends to `<tmp>/confkit-debug.log`. Disabled unless
//! `CONFKIT_DEBUG` is `1` or `true`; `CONFKIT_LOG_LEVEL` sets the minimum
//! level (default `debug`).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::SystemTime;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Parse a level name, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn from_u8(level: u8) -> Self {
        match level {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Level gate, read without locking
struct Gate {
    enabled: AtomicBool,
    min_level: AtomicU8,
}

impl Gate {
    fn from_env() -> Self {
        let enabled = std::env::var("CONFKIT_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let min_level = std::env::var("CONFKIT_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);

        Self {
            enabled: AtomicBool::new(enabled),
            min_level: AtomicU8::new(min_level as u8),
        }
    }
}

struct FileLoggerState {
    file: Option<File>,
}

impl FileLoggerState {
    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if self.file.is_none() {
            self.file = open_log_file();
        }
        if let Some(ref mut file) = self.file {
            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp(), level, module, message);
            let _ = file.flush();
        }
    }
}

fn open_log_file() -> Option<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path())
        .ok()
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs();
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                (secs % 86400) / 3600,
                (secs % 3600) / 60,
                secs % 60,
                d.subsec_millis()
            )
        })
        .unwrap_or_else(|_| "??:??:??.???".to_string())
}

static GATE: Lazy<Gate> = Lazy::new(Gate::from_env);

// The file is opened on first write
static LOGGER: Lazy<Mutex<FileLoggerState>> = Lazy::new(|| Mutex::new(FileLoggerState { file: None }));

/// Whether a message at `level` would be written
pub fn level_enabled(level: LogLevel) -> bool {
    GATE.enabled.load(Ordering::Relaxed) && level as u8 >= GATE.min_level.load(Ordering::Relaxed)
}

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    if !level_enabled(level) {
        return;
    }
    LOGGER.lock().write(level, module, message);
}

pub fn trace(module: &str, message: &str) {
    log(LogLevel::Trace, module, message);
}

pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

pub fn info(module: &str, message: &str) {
    log(LogLevel::Info, module, message);
}

pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

pub fn error(module: &str, message: &str) {
    log(LogLevel::Error, module, message);
}

/// Whether the file logger is writing anything
pub fn is_enabled() -> bool {
    GATE.enabled.load(Ordering::Relaxed)
}

/// Turn the file logger on or off at runtime
pub fn set_enabled(enabled: bool) {
    GATE.enabled.store(enabled, Ordering::Relaxed);
}

/// Current minimum level
pub fn min_level() -> LogLevel {
    LogLevel::from_u8(GATE.min_level.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime
pub fn set_min_level(level: LogLevel) {
    GATE.min_level.store(level as u8, Ordering::Relaxed);
}

/// Log with automatic module name
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::logging::file_logger::level_enabled($crate::logging::file_logger::LogLevel::Debug) {
            $crate::logging::file_logger::debug(module_path!(), &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        if $crate::logging::file_logger::level_enabled($crate::logging::file_logger::LogLevel::Trace) {
            $crate::logging::file_logger::trace(module_path!(), &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        if $crate::logging::file_logger::level_enabled($crate::logging::file_logger::LogLevel::Warn) {
            $crate::logging::file_logger::warn(module_path!(), &format!($($arg)*))
        }
    };
}

/// Get the path to the log file
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("confkit-debug.log")
}
