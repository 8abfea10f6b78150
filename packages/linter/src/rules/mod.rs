pub mod dollar_variable_colon_newline_after;

pub use dollar_variable_colon_newline_after::DollarVariableColonNewlineAfter;

use crate::config::{LintConfig, RuleSetting};
use crate::diagnostic::Diagnostic;
use crate::error::{ConfigError, ConfigResult};
use crate::whitespace::Mode;
use sassline_parser::ast::{Declaration, LineEnding};

/// Trait for implementing lint rules
pub trait LintRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check a single declaration
    fn check_declaration(&self, _decl: &Declaration) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Fixed copy of a violating declaration, or None if the rule cannot fix it
    fn fix_declaration(&self, _decl: &Declaration, _line_ending: LineEnding) -> Option<Declaration> {
        None
    }
}

/// Registry of configured lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules at their default options
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(DollarVariableColonNewlineAfter::new(Mode::Always))],
        }
    }

    /// Build a registry from the `rules` section of a config.
    ///
    /// Any invalid entry fails the whole registry, so nothing is linted with
    /// a half-applied configuration.
    pub fn from_config(config: &LintConfig) -> ConfigResult<Self> {
        let mut registry = Self::empty();

        for (name, setting) in &config.rules {
            let Some(setting) = setting else {
                continue; // disabled
            };

            match name.as_str() {
                dollar_variable_colon_newline_after::RULE_NAME => {
                    registry.add_rule(Box::new(build_dollar_variable_rule(setting)?));
                }
                _ => return Err(ConfigError::UnknownRule(name.clone())),
            }
        }

        Ok(registry)
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }
}

fn build_dollar_variable_rule(setting: &RuleSetting) -> ConfigResult<DollarVariableColonNewlineAfter> {
    let mut rule = DollarVariableColonNewlineAfter::from_option(setting.option())?;

    if let Some(secondary) = setting.secondary() {
        if let Some(severity) = secondary.severity {
            rule = rule.with_severity(severity);
        }
        if let Some(message) = &secondary.message {
            rule = rule.with_message(message.clone());
        }
    }

    Ok(rule)
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field(
                "rules",
                &self.rules.iter().map(|rule| rule.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticLevel;

    #[test]
    fn test_default_registry() {
        let registry = RuleRegistry::new();
        assert_eq!(registry.rules().len(), 1);
        assert_eq!(
            registry.rules()[0].name(),
            "scss/dollar-variable-colon-newline-after"
        );
    }

    #[test]
    fn test_from_config_with_secondary_options() {
        let config = LintConfig::from_json(
            r#"{ "rules": { "scss/dollar-variable-colon-newline-after": ["always-multi-line", { "severity": "warning" }] } }"#,
        )
        .unwrap();
        let registry = RuleRegistry::from_config(&config).unwrap();
        assert_eq!(registry.rules().len(), 1);

        let decl = sassline_parser::parse("$a: 1,\n  2;").unwrap();
        let sassline_parser::ast::Node::Declaration(decl) = &decl.nodes[0] else {
            panic!("expected declaration");
        };
        let diagnostics = registry.rules()[0].check_declaration(decl);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn test_disabled_rule() {
        let config =
            LintConfig::from_json(r#"{ "rules": { "scss/dollar-variable-colon-newline-after": null } }"#)
                .unwrap();
        assert!(RuleRegistry::from_config(&config).unwrap().rules().is_empty());
    }

    #[test]
    fn test_invalid_option() {
        let config = LintConfig::from_json(
            r#"{ "rules": { "scss/dollar-variable-colon-newline-after": "never" } }"#,
        )
        .unwrap();
        let err = RuleRegistry::from_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid option value \"never\" for rule \"scss/dollar-variable-colon-newline-after\" (expected one of: always, always-multi-line)"
        );
    }

    #[test]
    fn test_unknown_rule() {
        let config = LintConfig::from_json(r#"{ "rules": { "color-named": "never" } }"#).unwrap();
        assert!(matches!(
            RuleRegistry::from_config(&config),
            Err(ConfigError::UnknownRule(name)) if name == "color-named"
        ));
    }
}
