//! Delimited-text formats understood by the validator.

use std::fmt;

use crate::error::ValidatorError;

/// A recognized input/output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl RecordFormat {
    /// Resolves a free-text format answer.
    ///
    /// Surrounding whitespace is ignored and matching is case-insensitive,
    /// so `" CSV "` and `"csv"` are the same format.
    ///
    /// # Returns
    ///
    /// * `Result<RecordFormat, ValidatorError>` - the format, or
    ///   `InvalidFormat` carrying the value as it was given
    pub fn parse(raw: &str) -> Result<Self, ValidatorError> {
        match raw.trim().to_lowercase().as_str() {
            "csv" => Ok(RecordFormat::Csv),
            "tsv" => Ok(RecordFormat::Tsv),
            _ => Err(ValidatorError::InvalidFormat(raw.to_string())),
        }
    }

    /// Field separator byte for this format.
    pub fn delimiter(self) -> u8 {
        match self {
            RecordFormat::Csv => b',',
            RecordFormat::Tsv => b'\t',
        }
    }

    /// Lower-case extension used for the output files.
    pub fn extension(self) -> &'static str {
        match self {
            RecordFormat::Csv => "csv",
            RecordFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::Csv => write!(f, "CSV"),
            RecordFormat::Tsv => write!(f, "TSV"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(RecordFormat::parse("csv").unwrap(), RecordFormat::Csv);
        assert_eq!(RecordFormat::parse("CSV").unwrap(), RecordFormat::Csv);
        assert_eq!(RecordFormat::parse(" Tsv\t").unwrap(), RecordFormat::Tsv);
    }

    #[test]
    fn unknown_format_keeps_original_value() {
        match RecordFormat::parse("XML") {
            Err(ValidatorError::InvalidFormat(value)) => assert_eq!(value, "XML"),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
        assert!(RecordFormat::parse("").is_err());
    }

    #[test]
    fn delimiters_and_extensions() {
        assert_eq!(RecordFormat::Csv.delimiter(), b',');
        assert_eq!(RecordFormat::Tsv.delimiter(), b'\t');
        assert_eq!(RecordFormat::Csv.extension(), "csv");
        assert_eq!(RecordFormat::Tsv.extension(), "tsv");
    }
}
