//! Error taxonomy for the field-count validator.

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

use crate::format::RecordFormat;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("{0} is not a csv or tsv")]
    InvalidFormat(String),

    #[error("field count must be a non-negative integer, got '{0}'")]
    InvalidFieldCount(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0} input is not supported")]
    UnsupportedFormat(RecordFormat),

    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error("failed to write {}: {}", .path.display(), .reason)]
    WriteFailed { path: PathBuf, reason: String },

    #[error("failed to read answer: {0}")]
    Prompt(String),
}

impl ValidatorError {
    /// Process exit status for this error kind.
    ///
    /// `2` is left free for clap's own usage errors.
    pub fn exit_code(&self) -> ExitCode {
        let code: u8 = match self {
            ValidatorError::InvalidFormat(_) => 3,
            ValidatorError::InvalidFieldCount(_) => 4,
            ValidatorError::FileNotFound(_) => 5,
            ValidatorError::UnsupportedFormat(_) => 6,
            ValidatorError::ParseError(_) => 7,
            ValidatorError::WriteFailed { .. } => 8,
            ValidatorError::Prompt(_) => 9,
        };
        ExitCode::from(code)
    }
}
