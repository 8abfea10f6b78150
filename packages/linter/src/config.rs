use crate::diagnostic::DiagnosticLevel;
use crate::error::{ConfigError, ConfigResult};
use crate::rules::dollar_variable_colon_newline_after::RULE_NAME;
use crate::rules::RuleRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "sassline.config.json";

/// Lint configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    /// Glob patterns selecting files when linting a directory
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Rule name to setting; `null` disables a rule
    #[serde(default)]
    pub rules: BTreeMap<String, Option<RuleSetting>>,
}

fn default_include() -> Vec<String> {
    vec!["**/*.scss".to_string()]
}

/// `"always"`, `["always"]` or `["always", { "severity": "warning" }]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Primary(String),
    WithSecondary(String, SecondaryOptions),
    PrimaryOnly([String; 1]),
}

impl RuleSetting {
    pub fn option(&self) -> &str {
        match self {
            RuleSetting::Primary(option)
            | RuleSetting::WithSecondary(option, _)
            | RuleSetting::PrimaryOnly([option]) => option,
        }
    }

    pub fn secondary(&self) -> Option<&SecondaryOptions> {
        match self {
            RuleSetting::Primary(_) | RuleSetting::PrimaryOnly(_) => None,
            RuleSetting::WithSecondary(_, secondary) => Some(secondary),
        }
    }
}

/// Options every rule accepts next to its primary option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecondaryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<DiagnosticLevel>,

    /// Replaces the rule's own message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LintConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the rules section and build the registry
    pub fn registry(&self) -> ConfigResult<RuleRegistry> {
        RuleRegistry::from_config(self)
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            RULE_NAME.to_string(),
            Some(RuleSetting::Primary("always".to_string())),
        );

        Self {
            include: default_include(),
            rules,
        }
    }
}
