use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Problems with rule configuration; a run that hits one lints nothing
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid option value \"{actual}\" for rule \"{rule}\" (expected one of: {possible})")]
    InvalidOption {
        rule: String,
        actual: String,
        possible: String,
    },

    #[error("Unknown rule \"{0}\"")]
    UnknownRule(String),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn invalid_option(rule: &str, actual: &str, possible: &[&str]) -> Self {
        Self::InvalidOption {
            rule: rule.to_string(),
            actual: actual.to_string(),
            possible: possible.join(", "),
        }
    }
}
