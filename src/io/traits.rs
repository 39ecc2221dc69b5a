//! Core trait for record formats.
//!
//! Defines the [`Format`] trait that format adapters implement to persist
//! records in a particular file layout.

use crate::Result;
use crate::models::Record;
use std::path::Path;

/// A serialization strategy for a sequence of records.
///
/// Formats are stateless apart from their name. They are not bound to a file:
/// every call receives the path it operates on, and opens and closes the file
/// within the call.
///
/// # Contract
///
/// - [`write`](Format::write) appends: calling it repeatedly builds up a
///   growing dataset, creating the file (and any header) on first use.
/// - [`read_all`](Format::read_all) returns records in file order and treats
///   an absent file as an empty dataset.
/// - Whatever `write` stores, `read_all` must return unchanged. Conversions
///   between formats rely on this and verify it after every migration.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl Format for NdjsonFormat {
///     fn name(&self) -> &'static str {
///         "ndjson"
///     }
///
///     fn write(&self, record: &Record, path: &Path) -> Result<()> {
///         let mut file = OpenOptions::new().create(true).append(true).open(path)?;
///         serde_json::to_writer(&mut file, record)?;
///         writeln!(file)?;
///         Ok(())
///     }
///
///     fn read_all(&self, path: &Path) -> Result<Vec<Record>> {
///         // One JSON object per line
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Returns the format name, which is also its file extension.
    fn name(&self) -> &'static str;

    /// Appends a record to the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, parsed, or written.
    fn write(&self, record: &Record, path: &Path) -> Result<()>;

    /// Reads every record stored at `path`, in file order.
    ///
    /// Returns an empty vector if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn read_all(&self, path: &Path) -> Result<Vec<Record>>;
}
