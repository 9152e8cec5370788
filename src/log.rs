//! Leveled logging to stderr.
//!
//! Used by the `ls8` binary for load reports, instruction traces and fatal
//! errors. Program output from PRN never goes through here.

use std::fmt::Display;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Log level for filtering messages.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Trace => "TRACE",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        };
        f.pad(name)
    }
}

/// Prefix each line with seconds since the Unix epoch.
pub static SHOW_TIMESTAMP: AtomicBool = AtomicBool::new(false);

/// Prefix each line with its level.
pub static SHOW_TYPE: AtomicBool = AtomicBool::new(true);

static MIN_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Drops messages below `level`.
pub fn set_level(level: Level) {
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Whether a message at `level` would be written.
pub fn enabled(level: Level) -> bool {
    level as u8 >= MIN_LEVEL.load(Ordering::Relaxed)
}

fn color_spec(level: Level) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match level {
        Level::Trace => {
            spec.set_fg(Some(Color::Cyan));
        }
        Level::Warn => {
            spec.set_fg(Some(Color::Yellow)).set_bold(true);
        }
        Level::Error => {
            spec.set_fg(Some(Color::Red)).set_bold(true);
        }
        Level::Info => {}
    }
    spec
}

/// Internal logging function. Use the `trace!`, `info!`, `warn!`, or `error!`
/// macros instead.
#[doc(hidden)]
pub fn log(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(&color_spec(level));

    if SHOW_TIMESTAMP.load(Ordering::Relaxed) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        let _ = write!(stderr, "{}.{:03} ", now.as_secs(), now.subsec_millis());
    }
    if SHOW_TYPE.load(Ordering::Relaxed) {
        let _ = write!(stderr, "[{:5}] ", level);
    }
    let _ = writeln!(stderr, "{}", message);
    let _ = stderr.reset();
}

/// Logs a trace-level message.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{
        if $crate::log::enabled($crate::log::Level::Trace) {
            $crate::log::log($crate::log::Level::Trace, &format!($($arg)*));
        }
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        $crate::log::log($crate::log::Level::Info, &format!($($arg)*))
    }};
}

/// Logs a warning-level message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        $crate::log::log($crate::log::Level::Warn, &format!($($arg)*))
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        $crate::log::log($crate::log::Level::Error, &format!($($arg)*))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Trace < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn level_display() {
        assert_eq!(format!("{}", Level::Trace), "TRACE");
        assert_eq!(format!("{}", Level::Info), "INFO");
        assert_eq!(format!("{}", Level::Warn), "WARN");
        assert_eq!(format!("{}", Level::Error), "ERROR");
        assert_eq!(format!("[{:5}]", Level::Warn), "[WARN ]");
    }

    #[test]
    fn level_filtering() {
        set_level(Level::Warn);
        assert!(!enabled(Level::Info));
        assert!(enabled(Level::Error));

        set_level(Level::Info);
        assert!(!enabled(Level::Trace));
        assert!(enabled(Level::Info));
    }
}
