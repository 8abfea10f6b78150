use crate::error::{CommonError, CommonResult};
use sassline_parser::ast::Stylesheet;
use sassline_parser::{format_error, parse};
use std::path::{Path, PathBuf};

/// A stylesheet file on disk together with its text
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a file from disk
    pub fn load(path: &Path) -> CommonResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CommonError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, text))
    }

    pub fn parse(&self) -> CommonResult<Stylesheet> {
        parse(&self.text).map_err(|source| CommonError::ParseFile {
            path: self.path.clone(),
            source,
        })
    }

    /// Render a parse error against this file's text
    pub fn render_error(&self, error: &CommonError) -> String {
        match error {
            CommonError::Parse(source) | CommonError::ParseFile { source, .. } => {
                format_error(&self.text, &self.path.to_string_lossy(), source)
            }
            other => other.to_string(),
        }
    }

    /// Replace the file contents; no-op when the text is unchanged
    pub fn write(&self, text: &str) -> CommonResult<bool> {
        if text == self.text {
            return Ok(false);
        }
        std::fs::write(&self.path, text).map_err(|source| CommonError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(true)
    }
}
