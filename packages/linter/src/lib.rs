mod config;
mod diagnostic;
mod error;
mod linter;
pub mod rules;
pub mod whitespace;

pub use config::{LintConfig, RuleSetting, SecondaryOptions, DEFAULT_CONFIG_NAME};
pub use diagnostic::{rule_message, Diagnostic, DiagnosticLevel};
pub use error::{ConfigError, ConfigResult};
pub use linter::{lint_source, lint_stylesheet, LintOptions, LintReport};
pub use rules::dollar_variable_colon_newline_after::{check_stylesheet, RuleOutcome};
pub use rules::{DollarVariableColonNewlineAfter, LintRule, RuleRegistry};
pub use whitespace::Mode;
