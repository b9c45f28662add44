//! Record classification by field count.
//!
//! The first row of every input is a header and is left out of both
//! partitions. Each remaining row is compared against the expected field
//! count: equal goes to `good_records`, anything else to `bad_records`.
//! The parser itself is flexible and never enforces a column count.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::config::SessionInput;
use crate::error::ValidatorError;
use crate::format::RecordFormat;

/// One parsed row, as an ordered list of field values.
pub type Record = Vec<String>;

/// Partitioned rows of one input file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The skipped first row, if the input had any rows at all
    pub header: Option<Record>,
    /// Rows whose field count matches the expected count, in input order
    pub good_records: Vec<Record>,
    /// All other rows, in input order
    pub bad_records: Vec<Record>,
}

impl Classification {
    /// Number of rows classified, not counting the header.
    pub fn total_rows(&self) -> usize {
        self.good_records.len() + self.bad_records.len()
    }
}

/// Knobs that narrow what the resolver accepts.
#[derive(Debug, Default, Clone)]
pub struct ClassifyOptions {
    /// Formats that are recognized but refused with `UnsupportedFormat`
    pub disabled_formats: Vec<RecordFormat>,
}

/// A fully typed classification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyRequest {
    pub location: PathBuf,
    pub format: RecordFormat,
    pub field_count: usize,
}

impl ClassifyRequest {
    /// Validates raw session answers before any file is read.
    ///
    /// Checks run in a fixed order and the first failure wins:
    ///
    /// 1. format is `csv` or `tsv` (`InvalidFormat`)
    /// 2. field count is a non-negative integer (`InvalidFieldCount`)
    /// 3. the input file exists (`FileNotFound`)
    /// 4. the format is not disabled by `options` (`UnsupportedFormat`)
    ///
    /// # Arguments
    ///
    /// * `input` - The raw answers collected from the operator
    /// * `options` - Resolver restrictions; `ClassifyOptions::default()` accepts both formats
    ///
    /// # Returns
    ///
    /// * `Result<ClassifyRequest, ValidatorError>` - The typed request or the first validation error
    pub fn resolve(
        input: &SessionInput,
        options: &ClassifyOptions,
    ) -> Result<Self, ValidatorError> {
        let format = RecordFormat::parse(&input.format)?;
        let field_count = parse_field_count(&input.field_count)?;

        let location = PathBuf::from(&input.location);
        ensure_input_file(&location)?;

        if options.disabled_formats.contains(&format) {
            return Err(ValidatorError::UnsupportedFormat(format));
        }

        Ok(Self {
            location,
            format,
            field_count,
        })
    }
}

fn parse_field_count(raw: &str) -> Result<usize, ValidatorError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ValidatorError::InvalidFieldCount(raw.to_string()))
}

fn ensure_input_file(path: &Path) -> Result<(), ValidatorError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ValidatorError::ParseError(format!(
            "{} is not a regular file",
            path.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ValidatorError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(ValidatorError::ParseError(format!(
            "cannot access {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Validates the answers and classifies the file they point at.
pub fn classify_session(
    input: &SessionInput,
    options: &ClassifyOptions,
) -> Result<(ClassifyRequest, Classification), ValidatorError> {
    let request = ClassifyRequest::resolve(input, options)?;
    let classification = classify_file(&request)?;
    Ok((request, classification))
}

/// Opens `request.location` and classifies its rows.
pub fn classify_file(request: &ClassifyRequest) -> Result<Classification, ValidatorError> {
    let file = fs::File::open(&request.location).map_err(|e| {
        ValidatorError::ParseError(format!(
            "cannot open {}: {}",
            request.location.display(),
            e
        ))
    })?;

    info!(
        path = %request.location.display(),
        format = %request.format,
        expected_fields = request.field_count,
        "classifying records"
    );
    classify_reader(file, request.format, request.field_count)
}

/// Classifies rows read from any byte source.
///
/// The whole input is buffered and scanned before anything is returned. Any
/// row-level failure (invalid UTF-8, unterminated quote, I/O error) discards
/// everything read so far.
pub fn classify_reader<R: Read>(
    mut reader: R,
    format: RecordFormat,
    field_count: usize,
) -> Result<Classification, ValidatorError> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .map_err(|e| ValidatorError::ParseError(e.to_string()))?;

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_slice());

    let mut classification = Classification::default();
    let mut last_record_start: Option<(u64, u64)> = None;

    for (row_index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| {
            let detail = match e.position() {
                Some(pos) => format!("line {}: {}", pos.line(), e),
                None => e.to_string(),
            };
            ValidatorError::ParseError(detail)
        })?;
        last_record_start = record.position().map(|pos| (pos.byte(), pos.line()));
        let fields: Record = record.iter().map(str::to_string).collect();

        if row_index == 0 {
            debug!(fields = fields.len(), "skipping header row");
            classification.header = Some(fields);
            continue;
        }

        let matches = fields.len() == field_count;
        debug!(
            row = row_index,
            fields = fields.len(),
            expected = field_count,
            matches,
            "classified row"
        );

        if matches {
            classification.good_records.push(fields);
        } else {
            classification.bad_records.push(fields);
        }
    }

    // An unclosed quote swallows everything up to EOF, so only the final
    // record can carry one.
    if let Some((byte, line)) = last_record_start {
        let tail = usize::try_from(byte)
            .ok()
            .and_then(|start| input.get(start..))
            .unwrap_or_default();
        if ends_inside_quotes(tail, format.delimiter()) {
            return Err(ValidatorError::ParseError(format!(
                "line {}: unterminated quoted field",
                line
            )));
        }
    }

    info!(
        rows = classification.total_rows(),
        good = classification.good_records.len(),
        bad = classification.bad_records.len(),
        "classification finished"
    );
    Ok(classification)
}

/// Scans raw record bytes with the same quoting rules as the reader: a
/// quote opens a quoted field only at the start of a field, and `""` inside
/// a quoted field is an escaped quote.
fn ends_inside_quotes(raw: &[u8], delimiter: u8) -> bool {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut bytes = raw.iter().peekable();

    while let Some(&b) = bytes.next() {
        if in_quotes {
            if b == b'"' {
                if bytes.peek() == Some(&&b'"') {
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        match b {
            b'"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            b'\n' | b'\r' => at_field_start = true,
            _ if b == delimiter => at_field_start = true,
            _ => at_field_start = false,
        }
    }

    in_quotes
}
