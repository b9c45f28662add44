//! Writes classified records back to delimited files.

use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::debug;

use crate::classifier::{Classification, Record};
use crate::error::ValidatorError;
use crate::format::RecordFormat;

/// Output file names for a format: `(correct.<ext>, incorrect.<ext>)`.
pub fn output_file_names(format: RecordFormat) -> (String, String) {
    (
        format!("correct.{}", format.extension()),
        format!("incorrect.{}", format.extension()),
    )
}

/// Writes `records` to `path`, replacing any existing file.
///
/// Rows of differing lengths are allowed. Fields containing the delimiter,
/// quotes or line breaks are quoted so the file reads back unchanged.
///
/// # Arguments
///
/// * `records` - Rows to write, in order
/// * `path` - Destination file
/// * `format` - Decides the field delimiter
///
/// # Returns
///
/// * `Result<PathBuf, ValidatorError>` - The written path, or `WriteFailed`
pub fn write_records(
    records: &[Record],
    path: &Path,
    format: RecordFormat,
) -> Result<PathBuf, ValidatorError> {
    let write_failed = |reason: String| ValidatorError::WriteFailed {
        path: path.to_path_buf(),
        reason,
    };

    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .flexible(true)
        .from_path(path)
        .map_err(|e| write_failed(e.to_string()))?;

    for record in records {
        writer
            .write_record(record)
            .map_err(|e| write_failed(e.to_string()))?;
    }
    writer.flush().map_err(|e| write_failed(e.to_string()))?;

    debug!(path = %path.display(), rows = records.len(), "wrote records");
    Ok(path.to_path_buf())
}

/// Outcome of writing both partitions. Each write is independent.
#[derive(Debug)]
pub struct WriteReport {
    pub correct: Result<PathBuf, ValidatorError>,
    pub incorrect: Result<PathBuf, ValidatorError>,
}

impl WriteReport {
    /// First failure, preferring the correct file's.
    pub fn into_result(self) -> Result<(PathBuf, PathBuf), ValidatorError> {
        Ok((self.correct?, self.incorrect?))
    }
}

/// Writes `correct.<ext>` and `incorrect.<ext>` into `output_dir`.
///
/// A failure on one file does not stop the other from being written.
/// Reporting either outcome is left to the caller.
pub fn write_classification(
    classification: &Classification,
    output_dir: &Path,
    format: RecordFormat,
) -> WriteReport {
    let (correct_name, incorrect_name) = output_file_names(format);

    let correct = write_records(
        &classification.good_records,
        &output_dir.join(correct_name),
        format,
    );

    let incorrect = write_records(
        &classification.bad_records,
        &output_dir.join(incorrect_name),
        format,
    );

    WriteReport { correct, incorrect }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_reader;
    use std::fs;

    fn rec(fields: &[&str]) -> Record {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn names_follow_the_format_extension() {
        assert_eq!(
            output_file_names(RecordFormat::Csv),
            ("correct.csv".to_string(), "incorrect.csv".to_string())
        );
        assert_eq!(
            output_file_names(RecordFormat::Tsv),
            ("correct.tsv".to_string(), "incorrect.tsv".to_string())
        );
    }

    #[test]
    fn writes_rows_of_any_length_with_the_format_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("incorrect.tsv");
        let rows = vec![rec(&["a"]), rec(&["b", "c", "d"])];

        write_records(&rows, &path, RecordFormat::Tsv).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\tc\td\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("correct.csv");
        fs::write(&path, "stale,content,here\nmore\n").unwrap();

        write_records(&[rec(&["x", "y"])], &path, RecordFormat::Csv).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x,y\n");
    }

    #[test]
    fn written_file_reads_back_to_the_same_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("correct.csv");
        let rows = vec![
            rec(&["plain", "with,comma", "with \"quote\""]),
            rec(&["multi\nline", "", "z"]),
        ];

        write_records(&rows, &path, RecordFormat::Csv).unwrap();

        // Prepend a header so the reader's header skip lines up.
        let written = fs::read_to_string(&path).unwrap();
        let reread = classify_reader(
            format!("h1,h2,h3\n{}", written).as_bytes(),
            RecordFormat::Csv,
            3,
        )
        .unwrap();
        assert_eq!(reread.good_records, rows);
    }

    #[test]
    fn failed_write_does_not_stop_the_other() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way of correct.csv makes that write fail.
        fs::create_dir(dir.path().join("correct.csv")).unwrap();
        let classification = Classification {
            header: None,
            good_records: vec![rec(&["a", "b"])],
            bad_records: vec![rec(&["c"])],
        };

        let report = write_classification(&classification, dir.path(), RecordFormat::Csv);

        assert!(matches!(
            report.correct,
            Err(ValidatorError::WriteFailed { .. })
        ));
        assert_eq!(
            report.incorrect.as_ref().unwrap(),
            &dir.path().join("incorrect.csv")
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("incorrect.csv")).unwrap(),
            "c\n"
        );
        assert!(report.into_result().is_err());
    }

    #[test]
    fn missing_output_dir_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_records(
            &[rec(&["a"])],
            &dir.path().join("nope").join("correct.csv"),
            RecordFormat::Csv,
        )
        .unwrap_err();
        assert!(matches!(err, ValidatorError::WriteFailed { .. }));
    }
}
