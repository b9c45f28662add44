//! Splits a CSV/TSV file into correct and incorrect records by field count.

pub mod classifier;
pub mod config;
pub mod csv_field_validator;
pub mod error;
pub mod format;
pub mod prompt;
pub mod writer;

pub use classifier::{
    Classification, ClassifyOptions, ClassifyRequest, Record, classify_file, classify_reader,
    classify_session,
};
pub use config::{CliArgs, SessionInput};
pub use csv_field_validator::{RunSummary, csv_field_validator_main, run_session};
pub use error::ValidatorError;
pub use format::RecordFormat;
pub use prompt::PromptSession;
pub use writer::{WriteReport, output_file_names, write_classification, write_records};
