use sassline_parser::ast::{Position, Span};
use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

/// A diagnostic message from the linter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// The rule that generated this diagnostic
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// Source range of the offending character
    pub span: Span,

    /// 1-based line and column of `span.start`
    pub position: Position,

    /// Offset of the problem relative to the start of the node
    pub index: usize,

    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(
        level: DiagnosticLevel,
        rule: impl Into<String>,
        message: impl Into<String>,
        span: Span,
        position: Position,
    ) -> Self {
        Self {
            level,
            rule: rule.into(),
            message: message.into(),
            span,
            position,
            index: 0,
            suggestion: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Append the rule name to a message, `Expected x (rule-name)`
pub fn rule_message(rule: &str, text: &str) -> String {
    format!("{} ({})", text, rule)
}
