//! Logging infrastructure for layerconf.
//!
//! A small leveled logger that writes to stderr or, optionally, a file. It
//! implements the [`log`] facade, so once installed it also renders the
//! library's own `log::debug!` and `log::warn!` diagnostics.

use std::env;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

/// Environment variable consulted by [`init_logger`].
pub const LOG_LEVEL_ENV: &str = "LAYERCONF_LOG_LEVEL";

/// Logging level for controlling output verbosity.
///
/// Levels are ordered from least verbose (`Error`) to most verbose (`Debug`).
///
/// # Examples
///
/// ```
/// use layerconf::LogLevel;
///
/// assert!(LogLevel::Error < LogLevel::Warn);
/// assert!(LogLevel::Info < LogLevel::Debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Errors, warnings and informational messages.
    Info,
    /// Everything.
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warn => write!(f, "WARN"),
            Self::Info => write!(f, "INFO"),
            Self::Debug => write!(f, "DEBUG"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes `error`, `warn` (or `warning`), `info` and `debug`,
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("INFO").unwrap(), LogLevel::Info);
    /// assert_eq!(LogLevel::parse("warning").unwrap(), LogLevel::Warn);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Trace,
        }
    }

    const fn from_log(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }
}

enum Sink {
    Stderr,
    File(File),
}

struct Inner {
    level: LogLevel,
    sink: Mutex<Sink>,
}

/// A leveled logger writing `LEVEL: message` lines.
///
/// Cloning is cheap; clones share the same sink.
///
/// # Examples
///
/// ```
/// use layerconf::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Warn);
/// logger.warn("config file not found, using defaults");
/// logger.debug("this is filtered out");
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match *self.inner.sink.lock() {
            Sink::Stderr => "stderr",
            Sink::File(_) => "file",
        };
        f.debug_struct("Logger")
            .field("level", &self.inner.level)
            .field("sink", &sink)
            .finish()
    }
}

impl Logger {
    /// Creates a logger writing to stderr.
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        Self::with_sink(level, Sink::Stderr)
    }

    /// Creates a logger appending to the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened for appending.
    pub fn to_file(level: LogLevel, path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_sink(level, Sink::File(file)))
    }

    fn with_sink(level: LogLevel, sink: Sink) -> Self {
        Self {
            inner: Arc::new(Inner {
                level,
                sink: Mutex::new(sink),
            }),
        }
    }

    /// Returns the configured log level.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.inner.level
    }

    /// Whether this logger writes to a file rather than stderr.
    #[must_use]
    pub fn writes_to_file(&self) -> bool {
        matches!(*self.inner.sink.lock(), Sink::File(_))
    }

    /// Registers this logger as the global [`log`] backend.
    ///
    /// Returns `false` if a global logger was already installed, in which case
    /// nothing changes.
    pub fn install(&self) -> bool {
        if log::set_boxed_logger(Box::new(self.clone())).is_err() {
            return false;
        }
        log::set_max_level(self.inner.level.filter());
        true
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Error, format_args!("{message}"));
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, format_args!("{message}"));
    }

    /// Logs an informational message.
    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, format_args!("{message}"));
    }

    /// Logs a debug message.
    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, format_args!("{message}"));
    }

    fn emit(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        if level > self.inner.level {
            return;
        }

        // Write failures have nowhere to be reported.
        let _ = match &mut *self.inner.sink.lock() {
            Sink::Stderr => writeln!(io::stderr().lock(), "{level}: {message}"),
            Sink::File(file) => writeln!(file, "{level}: {message}"),
        };
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Warn)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        LogLevel::from_log(metadata.level()) <= self.inner.level
    }

    fn log(&self, record: &log::Record<'_>) {
        self.emit(LogLevel::from_log(record.level()), *record.args());
    }

    fn flush(&self) {
        let _ = match &mut *self.inner.sink.lock() {
            Sink::Stderr => io::stderr().flush(),
            Sink::File(file) => file.flush(),
        };
    }
}

/// Builds a stderr logger from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (`verbose` selects Debug, `quiet` selects Error)
/// 2. the `LAYERCONF_LOG_LEVEL` environment variable
/// 3. Warn
///
/// If both `verbose` and `quiet` are set, `verbose` wins.
///
/// # Examples
///
/// ```
/// use layerconf::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false).level(), LogLevel::Debug);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Error);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Debug);
    }
    if quiet {
        return Logger::new(LogLevel::Error);
    }

    if let Ok(value) = env::var(LOG_LEVEL_ENV) {
        if let Ok(level) = LogLevel::parse(&value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Warn)
}
