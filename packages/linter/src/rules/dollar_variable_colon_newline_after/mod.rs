//! `scss/dollar-variable-colon-newline-after`
//!
//! Requires a newline after the colon of `$variable` declarations:
//!
//! ```scss
//! $shadow:
//!   0 0 0 1px #5b9dd9,
//!   0 0 2px 1px rgba(30, 140, 190, 0.8);
//! ```
//!
//! `always` checks every variable; `always-multi-line` only variables whose
//! value spans several lines. Parenthesized multi-line values such as maps
//! are never checked.

mod classifier;
mod locator;

pub use classifier::is_exempt;
pub use locator::find_separator_colon;

use crate::diagnostic::{rule_message, Diagnostic, DiagnosticLevel};
use crate::error::{ConfigError, ConfigResult};
use crate::linter::{lint_stylesheet, LintOptions, LintReport};
use crate::rules::{LintRule, RuleRegistry};
use crate::whitespace::{Checkpoint, Mode, WhitespaceChecker};
use sassline_parser::ast::{Declaration, LineEnding, Span, Stylesheet};
use tracing::trace;

pub const RULE_NAME: &str = "scss/dollar-variable-colon-newline-after";

pub fn expected_after() -> String {
    rule_message(RULE_NAME, "Expected newline after \":\"")
}

pub fn expected_after_multi_line() -> String {
    rule_message(RULE_NAME, "Expected newline after \":\" with a multi-line value")
}

/// A failed check on one declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Colon offset within `property + between`
    pub index: usize,
    pub message: String,
}

/// Lint rule requiring a newline after the colon of variable declarations
#[derive(Debug, Clone)]
pub struct DollarVariableColonNewlineAfter {
    checker: WhitespaceChecker,
    severity: DiagnosticLevel,
    message: Option<String>,
}

impl DollarVariableColonNewlineAfter {
    pub fn new(mode: Mode) -> Self {
        Self {
            checker: WhitespaceChecker::newline(mode, expected_after(), expected_after_multi_line()),
            severity: DiagnosticLevel::Error,
            message: None,
        }
    }

    /// Build the rule from its primary option, `always` or `always-multi-line`
    pub fn from_option(option: &str) -> ConfigResult<Self> {
        option
            .parse::<Mode>()
            .map(Self::new)
            .map_err(|actual| ConfigError::invalid_option(RULE_NAME, &actual, &Mode::POSSIBLE))
    }

    pub fn with_severity(mut self, severity: DiagnosticLevel) -> Self {
        self.severity = severity;
        self
    }

    /// Replace the built-in messages
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn mode(&self) -> Mode {
        self.checker.mode()
    }

    /// Run the check on one declaration
    pub fn evaluate(&self, decl: &Declaration) -> Option<Violation> {
        if !decl.is_variable() {
            return None;
        }

        if is_exempt(decl.value.trim()) {
            trace!(property = %decl.property, "multi-line parenthesized value, skipping");
            return None;
        }

        let candidate = decl.prop_with_separator();
        let index = find_separator_colon(&candidate)?;

        let checkpoint = Checkpoint {
            source: &candidate,
            index,
            line_check_str: &decl.value,
        };

        let mut violation = None;
        self.checker.after_one_only(&checkpoint, |message| {
            violation = Some(Violation {
                index,
                message: message.to_string(),
            });
        });
        violation
    }

    fn report(&self, decl: &Declaration, violation: Violation) -> Diagnostic {
        let candidate = decl.prop_with_separator();
        let start = decl.span.start + violation.index;
        let message = self.message.clone().unwrap_or(violation.message);

        Diagnostic::new(
            self.severity,
            RULE_NAME,
            message,
            Span::new(start, start + 1),
            decl.position.advance(&candidate, violation.index),
        )
        .with_index(violation.index)
        .with_suggestion("Put the value on the line after the colon")
    }

    /// Copy of `decl` whose separator ends in `:` + newline + indentation
    fn fixed(&self, decl: &Declaration, violation: &Violation, newline: &str) -> Option<Declaration> {
        let colon = violation.index.checked_sub(decl.property.len())?;
        let indent = match self.mode() {
            Mode::Always => declaration_indent(&decl.before),
            Mode::AlwaysMultiLine => second_line_indent(&decl.value),
        };

        let between = format!("{}:{}{}", &decl.between[..colon], newline, indent);
        Some(decl.with_between(between))
    }

    /// Diagnostics for every violating declaration in document order
    pub fn check(&self, stylesheet: &Stylesheet) -> Vec<Diagnostic> {
        self.lint(stylesheet, false).diagnostics
    }

    /// Fixed copy of the stylesheet; the input is left untouched
    pub fn fix(&self, stylesheet: &Stylesheet) -> Stylesheet {
        self.lint(stylesheet, true)
            .fixed
            .unwrap_or_else(|| stylesheet.clone())
    }

    fn lint(&self, stylesheet: &Stylesheet, fix: bool) -> LintReport {
        let mut registry = RuleRegistry::empty();
        registry.add_rule(Box::new(self.clone()));
        lint_stylesheet(
            stylesheet,
            LintOptions {
                registry: Some(registry),
                fix,
            },
        )
    }
}

impl LintRule for DollarVariableColonNewlineAfter {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Require a newline after the colon in $-variable declarations"
    }

    fn check_declaration(&self, decl: &Declaration) -> Vec<Diagnostic> {
        self.evaluate(decl)
            .map(|violation| vec![self.report(decl, violation)])
            .unwrap_or_default()
    }

    fn fix_declaration(&self, decl: &Declaration, line_ending: LineEnding) -> Option<Declaration> {
        let violation = self.evaluate(decl)?;
        self.fixed(decl, &violation, line_ending.as_str())
    }
}

/// The declaration's own indentation: its leading whitespace without line
/// breaks (stray `;` kept in the raw prefix are dropped too)
fn declaration_indent(before: &str) -> String {
    before
        .chars()
        .filter(|c| c.is_whitespace() && *c != '\n' && *c != '\r')
        .collect()
}

/// Leading whitespace of the value's second line; `\n`, `\r\n` and a lone
/// `\r` all end a line
fn second_line_indent(value: &str) -> String {
    let Some(line_end) = value.find(['\n', '\r']) else {
        return String::new();
    };
    let rest = &value[line_end..];
    let second_line = rest.strip_prefix("\r\n").unwrap_or(&rest[1..]);

    second_line
        .chars()
        .take_while(|c| c.is_whitespace() && *c != '\n' && *c != '\r')
        .collect()
}

/// Result of running the rule once over a stylesheet
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// Empty when fixing
    pub diagnostics: Vec<Diagnostic>,
    /// Present when fixing
    pub fixed: Option<Stylesheet>,
}

/// Validate `option` and run the rule over `stylesheet`, either reporting or
/// fixing. An invalid option fails before any declaration is visited.
pub fn check_stylesheet(stylesheet: &Stylesheet, option: &str, fix: bool) -> ConfigResult<RuleOutcome> {
    let rule = DollarVariableColonNewlineAfter::from_option(option)?;

    if fix {
        Ok(RuleOutcome {
            diagnostics: Vec::new(),
            fixed: Some(rule.fix(stylesheet)),
        })
    } else {
        Ok(RuleOutcome {
            diagnostics: rule.check(stylesheet),
            fixed: None,
        })
    }
}
