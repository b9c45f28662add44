//! Line-oriented question/answer session.
//!
//! The session owns its reader and writer for one invocation. The binary
//! binds it to stdin/stdout; tests bind it to in-memory buffers.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::{CliArgs, SessionInput};
use crate::error::ValidatorError;

pub const LOCATION_QUESTION: &str = "Where is this file located? ";
pub const FORMAT_QUESTION: &str =
    "Is the file format CSV (comma-separated values) or TSV (tab-separated values)? ";
pub const FIELD_COUNT_QUESTION: &str = "How many fields should each record contain? ";

pub struct PromptSession<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` and blocks until one line is read back.
    ///
    /// Only the line terminator is removed from the answer.
    pub fn question(&mut self, text: &str) -> Result<String, ValidatorError> {
        write!(self.output, "{}", text).map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(prompt_error)?;
        if read == 0 {
            return Err(ValidatorError::Prompt(format!(
                "input closed before answering '{}'",
                text.trim_end()
            )));
        }

        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        debug!(question = text.trim_end(), answer = %answer, "prompt answered");
        Ok(answer)
    }

    /// Asks all three questions in order and closes the session.
    pub fn collect(self) -> Result<SessionInput, ValidatorError> {
        self.collect_missing(None, None, None)
    }

    /// Asks only for answers that were not already supplied, keeping the
    /// usual question order, then closes the session.
    pub fn collect_missing(
        mut self,
        location: Option<String>,
        format: Option<String>,
        field_count: Option<String>,
    ) -> Result<SessionInput, ValidatorError> {
        let location = match location {
            Some(value) => value,
            None => self.question(LOCATION_QUESTION)?,
        };
        let format = match format {
            Some(value) => value,
            None => self.question(FORMAT_QUESTION)?,
        };
        let field_count = match field_count {
            Some(value) => value,
            None => self.question(FIELD_COUNT_QUESTION)?,
        };

        Ok(SessionInput {
            location,
            format,
            field_count,
        })
    }
}

/// Fills a `SessionInput` from the command line, prompting for the gaps.
pub fn session_from_args<R: BufRead, W: Write>(
    session: PromptSession<R, W>,
    args: &CliArgs,
) -> Result<SessionInput, ValidatorError> {
    session.collect_missing(
        args.location.clone(),
        args.format.clone(),
        args.field_count.clone(),
    )
}

fn prompt_error(e: std::io::Error) -> ValidatorError {
    ValidatorError::Prompt(e.to_string())
}
