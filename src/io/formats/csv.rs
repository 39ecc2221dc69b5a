//! CSV format adapter.
//!
//! The first write to a file emits the header row (the field names), every
//! write appends one record row. Values are quoted per standard CSV rules, so
//! commas, quotes and embedded newlines round-trip.

use super::io_error;
use crate::io::traits::Format;
use crate::models::{FIELD_NAMES, Record};
use crate::{Error, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// CSV format, stored as `<name>.csv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormat;

impl CsvFormat {
    /// Format name and file extension.
    pub const NAME: &'static str = "csv";

    /// Creates the CSV format.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Maps a CSV library error to an operation failure naming the file.
fn csv_error(operation: &str, path: &Path, e: &csv::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("{}: {e}", path.display()),
    }
}

impl Format for CsvFormat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn write(&self, record: &Record, path: &Path) -> Result<()> {
        // An empty file left behind by an interrupted first write still needs a header.
        let needs_header = !matches!(fs::metadata(path), Ok(meta) if meta.len() > 0);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| io_error("open_csv", path, &e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false) // We write headers manually
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        if needs_header {
            writer
                .write_record(FIELD_NAMES)
                .map_err(|e| csv_error("write_csv_headers", path, &e))?;
        }

        writer
            .write_record(record.values())
            .map_err(|e| csv_error("write_csv", path, &e))?;

        writer.flush().map_err(|e| io_error("flush_csv", path, &e))?;

        tracing::debug!(path = %path.display(), header = needs_header, "Appended CSV record");
        Ok(())
    }

    fn read_all(&self, path: &Path) -> Result<Vec<Record>> {
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // Field count is checked per row below
            .from_path(path)
            .map_err(|e| csv_error("open_csv", path, &e))?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| csv_error("read_csv", path, &e))?;
            if row.len() != FIELD_NAMES.len() {
                let line = row.position().map_or(0, csv::Position::line);
                return Err(Error::InvalidInput(format!(
                    "{} line {line}: expected {} fields, found {}",
                    path.display(),
                    FIELD_NAMES.len(),
                    row.len()
                )));
            }
            records.push(Record::from_values(row.iter())?);
        }

        tracing::debug!(path = %path.display(), count = records.len(), "Read CSV records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn john() -> Record {
        Record::new("John Doe", "123 Street street", "555-5555")
    }

    #[test]
    fn test_first_write_emits_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");

        CsvFormat::new().write(&john(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "name,address,phone number\nJohn Doe,123 Street street,555-5555\n"
        );
    }

    #[test]
    fn test_later_writes_append_rows_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        let format = CsvFormat::new();

        format.write(&john(), &path).unwrap();
        format
            .write(&Record::new("George Carlin", "1 Main St", "555-1234"), &path)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("name,address,phone number").count(), 1);
        assert_eq!(contents.lines().count(), 3);

        let records = format.read_all(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], john());
        assert_eq!(records[1].name, "George Carlin");
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let records = CsvFormat::new()
            .read_all(&dir.path().join("absent.csv"))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_header_only_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name,address,phone number\n").unwrap();

        assert!(CsvFormat::new().read_all(&path).unwrap().is_empty());
    }

    #[test]
    fn test_special_characters_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        let record = Record::new(
            "Doe, John \"JD\"",
            "Line one\nLine two",
            "  padded  ",
        );

        let format = CsvFormat::new();
        format.write(&record, &path).unwrap();
        assert_eq!(format.read_all(&path).unwrap(), vec![record]);
    }

    #[test]
    fn test_empty_values_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        let record = Record::new("", "", "");

        let format = CsvFormat::new();
        format.write(&record, &path).unwrap();
        assert_eq!(format.read_all(&path).unwrap(), vec![record]);
    }

    #[test]
    fn test_short_row_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name,address,phone number\nJohn Doe,123 Street street\n").unwrap();

        let err = CsvFormat::new().read_all(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "").unwrap();

        let format = CsvFormat::new();
        format.write(&john(), &path).unwrap();
        assert_eq!(format.read_all(&path).unwrap(), vec![john()]);
    }
}
