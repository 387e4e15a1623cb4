//! Prefixed console logger.
//!
//! Every line of a message is written with the logger's prefix and a level
//! tag, so output from several packages stays attributable:
//!
//! ```text
//! [mono] info: Target packages:
//! [mono] info: @acme/web
//! [@acme/web] info: > next build
//! ```
//!
//! `log` writes to stdout, `warn` and `error` write to stderr.

use std::fmt::Display;
use std::io::{self, IsTerminal};

/// Prefix used when none is provided.
pub const DEFAULT_PREFIX: &str = "[mono]";

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl ColorChoice {
    /// Resolve the choice against the current stdout.
    pub fn use_color(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Log levels, each with its own tag and stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Level::Info => "\x1b[32m",
            Level::Warn => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }
}

/// Wrap `text` in an ANSI color when `enabled`.
pub fn paint(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Logger that prefixes every line it writes.
#[derive(Debug, Clone)]
pub struct Logger {
    prefix: String,
    color: bool,
}

impl Logger {
    /// Create a logger with the default `[mono]` prefix.
    pub fn new(color: bool) -> Self {
        Logger {
            prefix: paint(DEFAULT_PREFIX, "\x1b[35m", color),
            color,
        }
    }

    /// Create a logger with a custom (already styled) prefix.
    pub fn with_prefix(prefix: impl Into<String>, color: bool) -> Self {
        Logger {
            prefix: prefix.into(),
            color,
        }
    }

    /// Whether this logger emits ANSI colors.
    pub fn use_color(&self) -> bool {
        self.color
    }

    /// Write an info message to stdout.
    pub fn log(&self, message: impl Display) {
        if let Some(out) = self.render(Level::Info, message) {
            println!("{}", out);
        }
    }

    /// Write a warning to stderr.
    pub fn warn(&self, message: impl Display) {
        if let Some(out) = self.render(Level::Warn, message) {
            eprintln!("{}", out);
        }
    }

    /// Write an error to stderr.
    pub fn error(&self, message: impl Display) {
        if let Some(out) = self.render(Level::Error, message) {
            eprintln!("{}", out);
        }
    }

    /// The formatted message, or `None` when it has no lines to write.
    fn render(&self, level: Level, message: impl Display) -> Option<String> {
        Some(self.format(level, &message.to_string())).filter(|out| !out.is_empty())
    }

    /// Format `message` exactly as it would be written at `level`.
    pub fn format(&self, level: Level, message: &str) -> String {
        let level = paint(level.as_str(), level.color_code(), self.color);
        format_lines(&format!("{} {}:", self.prefix, level), message)
    }
}

/// Prefix every line of `message`.
///
/// A trailing blank line (what a message ending in a newline splits into) is
/// dropped, trailing whitespace is stripped from each line, and leading
/// whitespace is kept so indentation survives.
pub fn format_lines(prefix: &str, message: &str) -> String {
    let mut lines: Vec<&str> = message.split('\n').collect();
    if lines.last().is_some_and(|last| last.trim().is_empty()) {
        lines.pop();
    }

    lines
        .iter()
        .map(|line| format!("{} {}", prefix, line.trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}
