//! Newline-after checks shared by separator rules.

use std::fmt;
use std::str::FromStr;

/// How strictly a newline is required after a separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A newline must always follow
    Always,
    /// A newline must follow only when the value spans several lines
    AlwaysMultiLine,
}

impl Mode {
    pub const POSSIBLE: [&'static str; 2] = ["always", "always-multi-line"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Always => "always",
            Mode::AlwaysMultiLine => "always-multi-line",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Mode::Always),
            "always-multi-line" => Ok(Mode::AlwaysMultiLine),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `text` has no line break
pub fn is_single_line(text: &str) -> bool {
    !text.contains(['\n', '\r'])
}

/// The place to check: `source[index]` is the separator
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'a> {
    pub source: &'a str,
    pub index: usize,
    /// Text whose line count decides whether multi-line mode applies
    pub line_check_str: &'a str,
}

/// Checks that a newline follows a separator
#[derive(Debug, Clone)]
pub struct WhitespaceChecker {
    mode: Mode,
    expected_after: String,
    expected_after_multi_line: String,
}

impl WhitespaceChecker {
    pub fn newline(
        mode: Mode,
        expected_after: impl Into<String>,
        expected_after_multi_line: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            expected_after: expected_after.into(),
            expected_after_multi_line: expected_after_multi_line.into(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the mode's message when the expectation is not met
    pub fn check_after(&self, at: &Checkpoint<'_>) -> Result<(), &str> {
        match self.mode {
            Mode::Always => {
                if newline_follows(at.source, at.index) {
                    Ok(())
                } else {
                    Err(self.expected_after.as_str())
                }
            }
            Mode::AlwaysMultiLine => {
                if is_single_line(at.line_check_str) || newline_follows(at.source, at.index) {
                    Ok(())
                } else {
                    Err(self.expected_after_multi_line.as_str())
                }
            }
        }
    }

    /// Calls `on_fail` once with the message if the check fails
    pub fn after_one_only<F: FnOnce(&str)>(&self, at: &Checkpoint<'_>, on_fail: F) {
        if let Err(message) = self.check_after(at) {
            on_fail(message);
        }
    }
}

/// Whether a line break follows `source[index]`, ignoring spaces and tabs.
/// Running out of text counts as no line break.
fn newline_follows(source: &str, index: usize) -> bool {
    let rest = source.get(index + 1..).unwrap_or("");
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.starts_with('\n') || rest.starts_with('\r')
}
