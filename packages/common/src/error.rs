use sassline_parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Common error type shared by the sassline crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to parse {path}: {source}")]
    ParseFile { path: PathBuf, source: ParseError },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type CommonResult<T> = Result<T, CommonError>;
