//! Request intake: turns an uploaded file into a validated square [`Matrix`].
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. filename extension must be exactly `.csv`
//! 2. content must parse as comma-separated CSV with equal-length records
//! 3. at least one row
//! 4. every row's length equals the number of rows

use std::path::Path;

use crate::error::{MatrixError, MatrixResult};
use crate::models::{Matrix, Upload};

/// Only extension accepted for uploads (case-sensitive).
pub const CSV_EXTENSION: &str = ".csv";

/// Extension of the final path component, including the leading dot.
///
/// Returns `""` when the name has no dot after its last `/`.
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind(['.', '/']) {
        Some(idx) if file_name[idx..].starts_with('.') => &file_name[idx..],
        _ => "",
    }
}

/// Reject any filename whose extension is not exactly `.csv`.
pub fn check_extension(file_name: &str) -> MatrixResult<()> {
    if file_extension(file_name) == CSV_EXTENSION {
        Ok(())
    } else {
        Err(MatrixError::InvalidFileFormat)
    }
}

/// Parse CSV bytes into rows of string cells.
///
/// No header row, comma delimiter, standard quoting. Blank lines are
/// skipped. Errors name the physical line (blank lines included) of the
/// offending record; when several problems exist the earliest line wins.
pub fn parse_csv(bytes: &[u8]) -> MatrixResult<Matrix> {
    // The csv reader tolerates stray quotes, so quoting is checked separately.
    let quote_fault = check_quotes(bytes).err();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .delimiter(b',')
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(err) => {
                let fault = CsvFault::from_csv(&err, bytes);
                return Err(match quote_fault {
                    Some(quote) if quote.line <= fault.line => quote.into(),
                    _ => fault.into(),
                });
            }
        }
    }

    match quote_fault {
        Some(quote) => Err(quote.into()),
        None => Ok(Matrix::new(rows)),
    }
}

/// A CSV problem located on a physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CsvFault {
    line: u64,
    reason: String,
}

impl CsvFault {
    fn new(line: u64, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }

    fn from_csv(err: &csv::Error, bytes: &[u8]) -> Self {
        let line = err
            .position()
            .map_or(1, |pos| record_start_line(bytes, pos.byte()));
        let reason = match err.kind() {
            csv::ErrorKind::UnequalLengths { .. } => "wrong number of fields".to_string(),
            csv::ErrorKind::Utf8 { .. } => "invalid UTF-8".to_string(),
            _ => err.to_string(),
        };
        Self::new(line, reason)
    }
}

impl From<CsvFault> for MatrixError {
    fn from(fault: CsvFault) -> Self {
        MatrixError::MalformedCsv(format!("record on line {}: {}", fault.line, fault.reason))
    }
}

/// Physical line (1-based) of the record the reader started at `byte`.
///
/// The reader's offset can point at blank lines it skipped before the
/// record, so those are stepped over too.
fn record_start_line(bytes: &[u8], byte: u64) -> u64 {
    let start = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    let mut line = 1 + bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64;
    for &b in &bytes[start..] {
        match b {
            b'\n' => line += 1,
            b'\r' => {}
            _ => break,
        }
    }
    line
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// Saw `"` inside a quoted field: either an escape or the closing quote
    QuoteInQuoted,
    /// Closing quote followed by `\r`; only `\n` may follow
    ClosedCr,
}

/// Strict quoting rules: a quoted field must be closed and followed by a
/// delimiter, a line end or end of input; unquoted fields hold no `"`.
fn check_quotes(bytes: &[u8]) -> Result<(), CsvFault> {
    const MISPLACED: &str = "extraneous or missing \" in quoted field";
    const BARE: &str = "bare \" in non-quoted field";

    let mut state = QuoteState::FieldStart;
    let mut line: u64 = 1;
    let mut quote_line: u64 = 1;

    for &b in bytes {
        state = match (state, b) {
            (QuoteState::FieldStart, b'"') => {
                quote_line = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, b',') => QuoteState::FieldStart,
            (QuoteState::FieldStart | QuoteState::Unquoted, b'\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::Unquoted, b'"') => return Err(CsvFault::new(line, BARE)),
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,

            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, b'\n') => {
                line += 1;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, _) => QuoteState::Quoted,

            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b',') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted | QuoteState::ClosedCr, b'\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::QuoteInQuoted, b'\r') => QuoteState::ClosedCr,
            (QuoteState::QuoteInQuoted | QuoteState::ClosedCr, _) => {
                return Err(CsvFault::new(line, MISPLACED))
            }
        };
    }

    match state {
        QuoteState::Quoted => Err(CsvFault::new(quote_line, MISPLACED)),
        _ => Ok(()),
    }
}

/// Run every intake check on an upload and return the validated matrix.
pub fn validate_upload(upload: &Upload) -> MatrixResult<Matrix> {
    check_extension(&upload.file_name)?;

    let matrix = parse_csv(&upload.bytes)?;

    if matrix.is_empty() {
        return Err(MatrixError::EmptyMatrix);
    }
    if !matrix.is_square() {
        return Err(MatrixError::NotSquare);
    }

    Ok(matrix)
}

/// Load a local file as an [`Upload`], keeping its path as the filename.
pub fn read_upload<P: AsRef<Path>>(path: P) -> std::io::Result<Upload> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    Ok(Upload::new(path.to_string_lossy(), bytes))
}
