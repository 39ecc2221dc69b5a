//! Database facade over the format registry.
//!
//! A [`Database`] is a base name plus a current format. It holds no records:
//! every read re-parses `<base>.<format>`, every write re-opens it.

use super::filter::GlobFilter;
use crate::io::{Format, FormatRegistry};
use crate::models::{Field, Record};
use crate::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// A contact dataset stored in one of the registered formats.
///
/// # Example
///
/// ```rust,no_run
/// use rolodex::{Database, Record};
///
/// # fn main() -> rolodex::Result<()> {
/// let db = Database::new("contacts", "json")?;
/// db.add(&Record::new("Ada", "1 Loop Rd", "555-0100"))?;
/// for record in &db {
///     println!("{}", record?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Database {
    /// Base name of the data file, without extension.
    file_name: PathBuf,
    /// Name of the current format, always a key of `formats`.
    current_format: &'static str,
    /// Available formats.
    formats: FormatRegistry,
}

impl Database {
    /// Opens a dataset with the built-in formats.
    ///
    /// Nothing is created on disk until the first write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if `format` is not a built-in format.
    pub fn new(file_name: impl Into<PathBuf>, format: &str) -> Result<Self> {
        Self::with_registry(file_name, format, FormatRegistry::builtin())
    }

    /// Opens a dataset with a custom format registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if `format` is not in `formats`.
    pub fn with_registry(
        file_name: impl Into<PathBuf>,
        format: &str,
        formats: FormatRegistry,
    ) -> Result<Self> {
        let current_format = formats.get(format)?.name();
        Ok(Self {
            file_name: file_name.into(),
            current_format,
            formats,
        })
    }

    /// Returns the base name of the data file.
    #[must_use]
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Returns the current format name.
    #[must_use]
    pub const fn current_format(&self) -> &'static str {
        self.current_format
    }

    /// Returns the path of the current data file, `<file_name>.<format>`.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.data_file_for(self.current_format)
    }

    /// Returns the available formats and the current format name.
    #[must_use]
    pub fn formats(&self) -> (&FormatRegistry, &'static str) {
        (&self.formats, self.current_format)
    }

    /// Returns the formats that have a data file for this base name.
    ///
    /// After a conversion this names the format the data now lives in, which
    /// may differ from the format this handle was opened with elsewhere.
    #[must_use]
    pub fn stored_formats(&self) -> Vec<&'static str> {
        self.formats
            .names()
            .into_iter()
            .filter(|name| self.data_file_for(name).is_file())
            .collect()
    }

    /// Adds a record to the dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the current format fails to write the record.
    pub fn add(&self, record: &Record) -> Result<()> {
        let path = self.data_file();
        self.current()?.write(record, &path)?;
        tracing::debug!(path = %path.display(), name = %record.name, "Added record");
        Ok(())
    }

    /// Imports every record from `source` into the dataset.
    ///
    /// The source format is picked from the file extension; records are
    /// written one at a time through the current format. Returns the number
    /// of records imported.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] if the extension names no known format
    /// - [`Error::OperationFailed`] if `source` does not exist or cannot be read
    /// - [`Error::PartialImport`] if a write fails; records written before it
    ///   stay in the data file
    pub fn import_records(&self, source: &Path) -> Result<usize> {
        let source_format = self.formats.for_path(source)?;
        if !source.is_file() {
            return Err(Error::OperationFailed {
                operation: "open_import_file".to_string(),
                cause: format!("{}: no such file", source.display()),
            });
        }

        let records = source_format.read_all(source)?;
        let target = self.current()?;
        let path = self.data_file();

        for (imported, record) in records.iter().enumerate() {
            if let Err(e) = target.write(record, &path) {
                tracing::warn!(
                    source = %source.display(),
                    imported,
                    error = %e,
                    "Import stopped part way through"
                );
                return Err(Error::PartialImport {
                    imported,
                    cause: e.to_string(),
                });
            }
        }

        tracing::info!(
            source = %source.display(),
            from = source_format.name(),
            to = self.current_format,
            count = records.len(),
            "Imported records"
        );
        Ok(records.len())
    }

    /// Migrates the dataset to another format.
    ///
    /// The records are written to `<file_name>.<new_format>` and read back;
    /// only if the read-back equals the source does the old file go away and
    /// the current format change. Otherwise the new file is removed and the
    /// dataset is left as it was.
    ///
    /// Converting to the current format is a no-op. Converting a dataset with
    /// no data file only switches the format.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] if `new_format` is not registered
    /// - [`Error::VerificationMismatch`] if the converted file does not read
    ///   back as the source records
    /// - [`Error::OperationFailed`] on I/O failure at any step
    pub fn convert(&mut self, new_format: &str) -> Result<()> {
        if new_format == self.current_format {
            return Ok(());
        }

        let target = self.formats.get(new_format)?;
        let target_name = target.name();
        let old_file = self.data_file();

        if !old_file.is_file() {
            tracing::info!(
                from = self.current_format,
                to = target_name,
                "No data file, switching format only"
            );
            self.current_format = target_name;
            return Ok(());
        }

        let records = self.current()?.read_all(&old_file)?;
        let new_file = self.data_file_for(target_name);

        // A previous interrupted conversion may have left this behind.
        remove_if_exists(&new_file, "remove_stale_file")?;

        if let Err(e) = write_verified(target, &records, &new_file) {
            tracing::warn!(
                from = self.current_format,
                to = target_name,
                error = %e,
                "Conversion failed, discarding new file"
            );
            discard(&new_file);
            return Err(e);
        }

        if let Err(e) = fs::remove_file(&old_file) {
            discard(&new_file);
            return Err(Error::OperationFailed {
                operation: "remove_data_file".to_string(),
                cause: format!("{}: {e}", old_file.display()),
            });
        }

        tracing::info!(
            from = self.current_format,
            to = target_name,
            count = records.len(),
            "Converted dataset"
        );
        self.current_format = target_name;
        Ok(())
    }

    /// Reads every record in the dataset, in storage order.
    ///
    /// A missing data file is an empty dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file exists but cannot be read or parsed.
    pub fn records(&self) -> Result<Vec<Record>> {
        self.current()?.read_all(&self.data_file())
    }

    /// Returns a lazy iterator over the records.
    ///
    /// The data file is read on the first call to `next`, so the iterator
    /// reflects the file as it is then. Each new iterator reads it again.
    #[must_use]
    pub const fn iter(&self) -> Records<'_> {
        Records {
            database: self,
            buffer: None,
        }
    }

    /// Deletes the current data file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clean(&self) -> Result<()> {
        let path = self.data_file();
        if remove_if_exists(&path, "remove_data_file")? {
            tracing::info!(path = %path.display(), "Removed data file");
        }
        Ok(())
    }

    /// Returns the records whose `field` matches the glob `pattern`.
    ///
    /// See [`GlobFilter`] for the matching rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read.
    pub fn filter(&self, field: Field, pattern: &str) -> Result<Vec<Record>> {
        let filter = GlobFilter::new(pattern);
        let matches: Vec<Record> = self
            .records()?
            .into_iter()
            .filter(|record| filter.matches(record.get(field)))
            .collect();

        tracing::debug!(%field, pattern, count = matches.len(), "Filtered records");
        Ok(matches)
    }

    fn current(&self) -> Result<&dyn Format> {
        self.formats.get(self.current_format)
    }

    fn data_file_for(&self, format: &str) -> PathBuf {
        let mut path = OsString::from(self.file_name.as_os_str());
        path.push(".");
        path.push(format);
        PathBuf::from(path)
    }
}

impl<'a> IntoIterator for &'a Database {
    type Item = Result<Record>;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`Database`]'s records.
///
/// A read error is yielded once, after which the iterator is exhausted.
#[derive(Debug)]
pub struct Records<'a> {
    database: &'a Database,
    buffer: Option<std::vec::IntoIter<Record>>,
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_none() {
            match self.database.records() {
                Ok(records) => self.buffer = Some(records.into_iter()),
                Err(e) => {
                    self.buffer = Some(Vec::new().into_iter());
                    return Some(Err(e));
                },
            }
        }
        self.buffer.as_mut().and_then(Iterator::next).map(Ok)
    }
}

/// Writes `records` to `path` one by one, then checks they read back unchanged.
fn write_verified(format: &dyn Format, records: &[Record], path: &Path) -> Result<()> {
    for record in records {
        format.write(record, path)?;
    }

    let written = format.read_all(path)?;
    if written.as_slice() != records {
        return Err(Error::VerificationMismatch {
            format: format.name().to_string(),
            expected: records.len(),
            found: written.len(),
        });
    }
    Ok(())
}

/// Removes a file, returning whether it existed.
fn remove_if_exists(path: &Path, operation: &str) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::OperationFailed {
            operation: operation.to_string(),
            cause: format!("{}: {e}", path.display()),
        }),
    }
}

/// Best-effort removal of a partially converted file.
fn discard(path: &Path) {
    if let Err(e) = remove_if_exists(path, "remove_converted_file") {
        tracing::warn!(error = %e, "Failed to remove partially converted file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn john() -> Record {
        Record::new("John Doe", "123 Street street", "555-5555")
    }

    fn george() -> Record {
        Record::new("George Carlin", "123 Street street", "555-5555")
    }

    fn database(dir: &TempDir, format: &str) -> Database {
        Database::new(dir.path().join("contacts"), format).unwrap()
    }

    #[test]
    fn test_unknown_format_rejected() {
        let dir = TempDir::new().unwrap();
        let result = Database::new(dir.path().join("contacts"), "xml");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_data_file_tracks_format() {
        let dir = TempDir::new().unwrap();
        let mut db = database(&dir, "csv");
        assert_eq!(db.data_file(), dir.path().join("contacts.csv"));

        db.convert("json").unwrap();
        assert_eq!(db.data_file(), dir.path().join("contacts.json"));
        assert_eq!(db.current_format(), "json");
    }

    #[test]
    fn test_data_file_keeps_dotted_base_name() {
        let db = Database::new("backup.v2", "csv").unwrap();
        assert_eq!(db.data_file(), PathBuf::from("backup.v2.csv"));
    }

    #[test]
    fn test_add_then_records() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "csv");

        db.add(&john()).unwrap();

        assert_eq!(db.records().unwrap(), vec![john()]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "json");
        assert!(db.records().unwrap().is_empty());
        assert_eq!(db.iter().count(), 0);
    }

    #[test]
    fn test_iteration_rereads_file() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "csv");
        db.add(&john()).unwrap();

        let first: Vec<Record> = db.iter().collect::<Result<_>>().unwrap();
        db.add(&george()).unwrap();
        let second: Vec<Record> = (&db).into_iter().collect::<Result<_>>().unwrap();

        assert_eq!(first, vec![john()]);
        assert_eq!(second, vec![john(), george()]);
    }

    #[test]
    fn test_iteration_is_lazy() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "csv");

        let mut iter = db.iter();
        db.add(&john()).unwrap();

        assert_eq!(iter.next().unwrap().unwrap(), john());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iteration_yields_read_error_once() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "json");
        fs::write(db.data_file(), "not json").unwrap();

        let mut iter = db.iter();
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "csv");
        db.add(&john()).unwrap();
        assert!(db.data_file().exists());

        db.clean().unwrap();
        assert!(!db.data_file().exists());
        db.clean().unwrap();
    }

    #[test]
    fn test_filter_by_name() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "csv");
        db.add(&john()).unwrap();
        db.add(&george()).unwrap();

        assert_eq!(db.filter(Field::Name, "George*").unwrap(), vec![george()]);
        assert_eq!(db.filter(Field::Address, "123*").unwrap().len(), 2);
        assert!(db.filter(Field::PhoneNumber, "999*").unwrap().is_empty());
    }

    #[test]
    fn test_stored_formats_follow_conversion() {
        let dir = TempDir::new().unwrap();
        let mut db = database(&dir, "csv");
        assert!(db.stored_formats().is_empty());

        db.add(&john()).unwrap();
        assert_eq!(db.stored_formats(), vec!["csv"]);

        db.convert("json").unwrap();
        assert_eq!(db.stored_formats(), vec!["json"]);

        let stale = database(&dir, "csv");
        assert!(!stale.data_file().exists());
        assert_eq!(stale.stored_formats(), vec!["json"]);
    }

    #[test]
    fn test_convert_same_format_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut db = database(&dir, "csv");
        db.add(&john()).unwrap();
        let before = fs::read(db.data_file()).unwrap();

        db.convert("csv").unwrap();

        assert_eq!(fs::read(db.data_file()).unwrap(), before);
    }

    #[test]
    fn test_convert_without_data_file_switches_only() {
        let dir = TempDir::new().unwrap();
        let mut db = database(&dir, "csv");

        db.convert("json").unwrap();

        assert_eq!(db.current_format(), "json");
        assert!(!dir.path().join("contacts.json").exists());
        assert!(!dir.path().join("contacts.csv").exists());
    }

    #[test]
    fn test_convert_unknown_format() {
        let dir = TempDir::new().unwrap();
        let mut db = database(&dir, "csv");
        db.add(&john()).unwrap();

        assert!(matches!(
            db.convert("yaml"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert_eq!(db.current_format(), "csv");
        assert_eq!(db.records().unwrap(), vec![john()]);
    }

    #[test]
    fn test_convert_unknown_format_without_data_file() {
        let dir = TempDir::new().unwrap();
        let mut db = database(&dir, "csv");

        assert!(db.convert("yaml").is_err());
        assert_eq!(db.current_format(), "csv");
    }

    #[test]
    fn test_convert_replaces_stale_target() {
        let dir = TempDir::new().unwrap();
        let mut db = database(&dir, "csv");
        db.add(&john()).unwrap();
        fs::write(dir.path().join("contacts.json"), "garbage from a crashed run").unwrap();

        db.convert("json").unwrap();

        assert_eq!(db.records().unwrap(), vec![john()]);
        assert!(!dir.path().join("contacts.csv").exists());
    }

    #[test]
    fn test_import_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "csv");
        let source = dir.path().join("people.txt");
        fs::write(&source, "John Doe").unwrap();

        assert!(matches!(
            db.import_records(&source),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(!db.data_file().exists());
    }

    #[test]
    fn test_import_missing_source() {
        let dir = TempDir::new().unwrap();
        let db = database(&dir, "csv");

        let result = db.import_records(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }
}
