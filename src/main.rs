//! CSV/TSV Field-Count Validator - Main Application
//!
//! Entry point for the validator. All of the work lives in the
//! csv_field_validator module.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for everything
//! $ cargo run --release
//!
//! # Non-interactive
//! $ cargo run --release -- -l path/to/file.csv -f csv -n 3 -o reports
//! ```

use std::process::ExitCode;

use csv_field_validator_rust::csv_field_validator_main;

/// call from module
fn main() -> ExitCode {
    csv_field_validator_main()
}
