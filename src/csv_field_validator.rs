//! # CSV/TSV Field-Count Validator
//!
//! Reads a delimited-text file, checks that every record has the expected
//! number of fields, and splits the records into `correct.<ext>` and
//! `incorrect.<ext>`.
//!
//! ## Usage
//!
//! ```bash
//! # Fully interactive: prompts for location, format and field count
//! $ cargo run --release
//!
//! # Answers supplied up front; anything missing is still prompted for
//! $ cargo run --release -- --location data/people.csv --format csv --field-count 3
//!
//! # Write the two output files somewhere other than the program's directory
//! $ cargo run --release -- -l data/people.tsv -f tsv -n 4 -o ./out
//! ```
//!
//! ## Behaviour
//!
//! The first row of the input is treated as a header. It is never compared
//! and never written back. Every other row goes to `correct.<ext>` when its
//! field count equals the expected count, otherwise to `incorrect.<ext>`.
//! Both files use the input's delimiter and are overwritten on each run.
//!
//! ## Exit codes
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | both files written |
//! | 3 | unrecognized format |
//! | 4 | field count is not a non-negative integer |
//! | 5 | input file not found |
//! | 6 | format recognized but disabled |
//! | 7 | input could not be read or parsed |
//! | 8 | an output file could not be written |
//! | 9 | stdin closed or unreadable while prompting |

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use crate::classifier::{ClassifyOptions, classify_session};
use crate::config::{CliArgs, SessionInput};
use crate::error::ValidatorError;
use crate::format::RecordFormat;
use crate::prompt::{PromptSession, session_from_args};
use crate::writer::write_classification;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub format: RecordFormat,
    pub good_count: usize,
    pub bad_count: usize,
    pub correct_path: PathBuf,
    pub incorrect_path: PathBuf,
}

/// Classifies the input described by `input` and writes both output files.
///
/// Validation and parse errors return before anything is written. Once the
/// file has been classified, both writes are attempted and each outcome is
/// reported on `console` as `Saved <fileName>` or the error text.
///
/// # Arguments
///
/// * `input` - Raw answers: location, format and field count
/// * `options` - Resolver restrictions (see `ClassifyOptions`)
/// * `output_dir` - Directory receiving `correct.<ext>` and `incorrect.<ext>`
/// * `console` - Where save confirmations are printed
///
/// # Returns
///
/// * `Result<RunSummary, ValidatorError>` - Counts and paths on success, or the
///   first error (a write failure is returned only after both writes ran)
pub fn run_session(
    input: &SessionInput,
    options: &ClassifyOptions,
    output_dir: &Path,
    console: &mut impl Write,
) -> Result<RunSummary, ValidatorError> {
    let (request, classification) = classify_session(input, options)?;

    let report = write_classification(&classification, output_dir, request.format);

    for outcome in [&report.correct, &report.incorrect] {
        match outcome {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                let _ = writeln!(console, "Saved {}", name);
            }
            Err(e) => {
                let _ = writeln!(console, "{}", e);
            }
        }
    }

    let (correct_path, incorrect_path) = report.into_result()?;

    Ok(RunSummary {
        format: request.format,
        good_count: classification.good_records.len(),
        bad_count: classification.bad_records.len(),
        correct_path,
        incorrect_path,
    })
}

/// Print a short summary after a successful run
fn print_success_message(summary: &RunSummary) {
    println!(
        "Checked {} {} records: {} correct, {} incorrect",
        summary.good_count + summary.bad_count,
        summary.format,
        summary.good_count,
        summary.bad_count
    );
    println!("  correct:   {}", summary.correct_path.display());
    println!("  incorrect: {}", summary.incorrect_path.display());
}

/// Main entry point for the field-count validator.
///
/// # Workflow
///
/// 1. Parse command line arguments
/// 2. Prompt on stdin/stdout for any answer not given as a flag
/// 3. Validate the answers and classify the input file
/// 4. Write `correct.<ext>` and `incorrect.<ext>`
/// 5. Map the outcome to a process exit code
pub fn csv_field_validator_main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let output_dir = args.resolved_output_dir();
    info!(output_dir = %output_dir.display(), "starting");

    let session = PromptSession::new(io::stdin().lock(), io::stdout());
    let result = session_from_args(session, &args).and_then(|input| {
        run_session(
            &input,
            &ClassifyOptions::default(),
            &output_dir,
            &mut io::stdout(),
        )
    });

    match result {
        Ok(summary) => {
            print_success_message(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}. Canceling process.", e);
            e.exit_code()
        }
    }
}

/// Logs go to stderr so they never interleave with the prompts on stdout.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,csv_field_validator_rust=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
