//! Command-line arguments and the raw answers a run starts from.

use std::env;
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "csv_field_validator_rust",
    about = "Split a CSV/TSV file into correct and incorrect records by field count"
)]
pub struct CliArgs {
    /// Input file path (prompted for if omitted)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Input format, csv or tsv (prompted for if omitted)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Expected number of fields per record (prompted for if omitted)
    #[arg(short = 'n', long)]
    pub field_count: Option<String>,

    /// Directory for correct.* and incorrect.* (defaults to the program's own directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Log each classified row
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Output directory: the explicit flag, else the executable's directory,
    /// else the current directory.
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// The three raw answers a run needs. Nothing here is validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInput {
    pub location: String,
    pub format: String,
    pub field_count: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_answers_can_come_from_flags() {
        let args = CliArgs::parse_from([
            "csv_field_validator_rust",
            "--location",
            "data.tsv",
            "-f",
            "TSV",
            "-n",
            "4",
            "-o",
            "out",
        ]);
        assert_eq!(args.location.as_deref(), Some("data.tsv"));
        assert_eq!(args.format.as_deref(), Some("TSV"));
        assert_eq!(args.field_count.as_deref(), Some("4"));
        assert_eq!(args.resolved_output_dir(), PathBuf::from("out"));
        assert!(!args.verbose);
    }

    #[test]
    fn flags_are_optional() {
        let args = CliArgs::parse_from(["csv_field_validator_rust", "-v"]);
        assert!(args.location.is_none());
        assert!(args.format.is_none());
        assert!(args.field_count.is_none());
        assert!(args.verbose);
    }

    #[test]
    fn default_output_dir_is_next_to_the_executable() {
        let args = CliArgs::parse_from(["csv_field_validator_rust"]);
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(args.resolved_output_dir(), exe_dir);
    }
}
