//! JSON format adapter.
//!
//! The file holds a single object whose `records` key maps to an array of
//! record objects. Appending is a full read-modify-write of the document, so
//! write cost grows with the file.

use super::io_error;
use crate::io::traits::Format;
use crate::models::Record;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Top-level key of the records array.
const RECORDS_KEY: &str = "records";

/// Indentation of the pretty-printed document.
const INDENT: &[u8] = b"    ";

/// On-disk document layout.
#[derive(Serialize)]
struct Document<'a> {
    records: &'a [Record],
}

/// JSON format, stored as `<name>.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl JsonFormat {
    /// Format name and file extension.
    pub const NAME: &'static str = "json";

    /// Creates the JSON format.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extracts the records array from a parsed document.
    ///
    /// Accepts the `records` key, or any single top-level key.
    fn records_value(document: Value, path: &Path) -> Result<Value> {
        let Value::Object(mut object) = document else {
            return Err(Error::InvalidInput(format!(
                "{}: expected a JSON object at the top level",
                path.display()
            )));
        };

        if let Some(records) = object.remove(RECORDS_KEY) {
            return Ok(records);
        }

        let keys = object.len();
        match object.into_iter().next() {
            Some((_, records)) if keys == 1 => Ok(records),
            _ => Err(Error::InvalidInput(format!(
                "{}: expected a single '{RECORDS_KEY}' key, found {keys} keys",
                path.display()
            ))),
        }
    }

    /// Serializes the document with 4-space indentation.
    fn render(records: &[Record]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        Document { records }
            .serialize(&mut serializer)
            .map_err(|e| Error::OperationFailed {
                operation: "serialize_json".to_string(),
                cause: e.to_string(),
            })?;
        buf.push(b'\n');
        Ok(buf)
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn write(&self, record: &Record, path: &Path) -> Result<()> {
        let mut records = self.read_all(path)?;
        records.push(record.clone());

        let data = Self::render(&records)?;
        fs::write(path, data).map_err(|e| io_error("write_json", path, &e))?;

        tracing::debug!(path = %path.display(), count = records.len(), "Rewrote JSON document");
        Ok(())
    }

    fn read_all(&self, path: &Path) -> Result<Vec<Record>> {
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(path).map_err(|e| io_error("read_json", path, &e))?;
        // Left behind by an interrupted first write.
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: Value = serde_json::from_str(&contents).map_err(|e| {
            Error::InvalidInput(format!("{}: failed to parse JSON: {e}", path.display()))
        })?;

        let records: Vec<Record> = serde_json::from_value(Self::records_value(document, path)?)
            .map_err(|e| {
                Error::InvalidInput(format!("{}: malformed record array: {e}", path.display()))
            })?;

        tracing::debug!(path = %path.display(), count = records.len(), "Read JSON records");
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
    fn test_first_write_creates_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");

        JsonFormat::new().write(&john(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let expected = r#"{
    "records": [
        {
            "name": "John Doe",
            "address": "123 Street street",
            "phone number": "555-5555"
        }
    ]
}
"#;
        assert_eq!(contents, expected);
    }

    #[test]
    fn test_writes_append_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        let format = JsonFormat::new();
        let george = Record::new("George Carlin", "1 Main St", "555-1234");

        format.write(&john(), &path).unwrap();
        format.write(&george, &path).unwrap();

        assert_eq!(format.read_all(&path).unwrap(), vec![john(), george]);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let records = JsonFormat::new()
            .read_all(&dir.path().join("absent.json"))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_file_reads_empty_and_accepts_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        fs::write(&path, "").unwrap();
        let format = JsonFormat::new();

        assert!(format.read_all(&path).unwrap().is_empty());

        format.write(&john(), &path).unwrap();
        assert_eq!(format.read_all(&path).unwrap(), vec![john()]);
    }

    #[test]
    fn test_single_foreign_key_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        fs::write(
            &path,
            r#"{"contacts": [{"name": "A", "address": "B", "phone number": "C"}]}"#,
        )
        .unwrap();

        let records = JsonFormat::new().read_all(&path).unwrap();
        assert_eq!(records, vec![Record::new("A", "B", "C")]);
    }

    #[test]
    fn test_wrong_shape_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");

        fs::write(&path, "[]").unwrap();
        assert!(matches!(
            JsonFormat::new().read_all(&path),
            Err(Error::InvalidInput(_))
        ));

        fs::write(&path, r#"{"a": [], "b": []}"#).unwrap();
        assert!(matches!(
            JsonFormat::new().read_all(&path),
            Err(Error::InvalidInput(_))
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFormat::new().read_all(&path),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_incomplete_record_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        fs::write(&path, r#"{"records": [{"name": "A"}]}"#).unwrap();

        assert!(matches!(
            JsonFormat::new().read_all(&path),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unicode_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        let record = Record::new("Zoë \"Z\" Ångström", "Straße 1\n2. OG", "");

        let format = JsonFormat::new();
        format.write(&record, &path).unwrap();
        assert_eq!(format.read_all(&path).unwrap(), vec![record]);
    }
}
