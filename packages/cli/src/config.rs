use anyhow::Result;
use sassline_linter::{LintConfig, DEFAULT_CONFIG_NAME};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the config file to use, if any
pub fn config_path(cwd: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(cwd.join(path)),
        None => {
            let path = cwd.join(DEFAULT_CONFIG_NAME);
            path.exists().then_some(path)
        }
    }
}

/// Load the config, falling back to the defaults when no file exists
pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<LintConfig> {
    match config_path(cwd, explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Ok(LintConfig::load(&path)?)
        }
        None => Ok(LintConfig::default()),
    }
}
